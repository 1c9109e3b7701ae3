//! # Formcraft TUI
//!
//! A terminal form builder backed by a REST forms service.
//!
//! ## Features
//! - Palette of field types (text, paragraph, number, date, checkbox, radio,
//!   dropdown, file upload) dragged onto a canvas
//! - Option editing for choice fields, field reordering
//! - Save and share: create or update the form, then fetch its share link
//! - Fill in a form and submit it as multipart (answers + attachments)
//! - Review submitted responses
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod error;
pub mod models;
pub mod builder;
pub mod renderer;
pub mod responses;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Field, FieldType, Form, FormSummary, ResponseEntry, Section, Submission};
pub use builder::FormDraft;
pub use renderer::{AnswerSheet, Widget};
pub use responses::ResponseReview;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{FormsClient, NetworkActor};
