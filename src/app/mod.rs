//! App layer - owns the form list, the builder draft, the answer sheet and
//! the response review, and turns UI events into backend commands.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::AppActor;
pub use state::{AppState, DragItem, Notice, NoticeKind};
