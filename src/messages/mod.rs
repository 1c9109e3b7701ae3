//! Messages passed between the terminal loop, the app actor and the network actor.
//!
//! Keys become [`UiEvent`]s, the app actor answers with [`RenderState`]
//! snapshots, and backend work travels as [`NetworkCommand`] / [`NetworkResponse`].

pub mod network;
pub mod render;
pub mod ui_events;

pub use network::{FormPurpose, NetworkCommand, NetworkResponse, Operation};
pub use render::RenderState;
pub use ui_events::UiEvent;
