//! App state - pure data structure with no I/O logic

use crate::builder::FormDraft;
use crate::messages::ui_events::{BuilderPanel, EditTarget, InputMode, Screen};
use crate::messages::RenderState;
use crate::models::{Field, Form, FormSummary};
use crate::renderer::AnswerSheet;
use crate::responses::ResponseReview;

/// Item currently being dragged on the builder screen
#[derive(Clone, Debug, PartialEq)]
pub enum DragItem {
    /// A palette entry, by palette index
    Palette(usize),
    /// An existing canvas field, by canvas index
    Field(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Inline status message
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub screen: Screen,
    pub api_url: String,

    // Form list
    pub forms: Vec<FormSummary>,
    pub selected_form: usize,
    pub forms_error: Option<String>,

    // Builder
    pub draft: FormDraft,
    pub builder_panel: BuilderPanel,
    pub palette_selected: usize,
    pub canvas_selected: usize,
    pub drag: Option<DragItem>,
    pub drop_position: usize,
    pub option_input: String,
    pub share_link: Option<String>,

    // Fill
    pub fill_form: Option<Form>,
    pub answers: AnswerSheet,
    pub fill_selected: usize,
    pub option_cursor: usize,

    // Responses
    pub review: Option<ResponseReview>,

    // UI state
    pub input_mode: InputMode,
    pub edit_target: Option<EditTarget>,
    pub is_loading: bool,
    pub notice: Option<Notice>,
    pub alert: Option<String>,
    pub show_help: bool,

    // Requests
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_API_URL)
    }
}

impl AppState {
    pub fn new(api_url: impl Into<String>) -> Self {
        AppState {
            screen: Screen::FormList,
            api_url: api_url.into(),
            forms: Vec::new(),
            selected_form: 0,
            forms_error: None,
            draft: FormDraft::new(),
            builder_panel: BuilderPanel::Title,
            palette_selected: 0,
            canvas_selected: 0,
            drag: None,
            drop_position: 0,
            option_input: String::new(),
            share_link: None,
            fill_form: None,
            answers: AnswerSheet::new(),
            fill_selected: 0,
            option_cursor: 0,
            review: None,
            input_mode: InputMode::Normal,
            edit_target: None,
            is_loading: false,
            notice: None,
            alert: None,
            show_help: false,
            next_request_id: 1,
            pending_request_id: None,
        }
    }

    /// Generate a unique request ID and mark it as the one being awaited
    pub fn begin_request(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request_id = Some(id);
        self.is_loading = true;
        id
    }

    /// Stop awaiting the in-flight request; its response will be ignored
    pub fn cancel_request(&mut self) {
        if let Some(id) = self.pending_request_id.take() {
            tracing::debug!(id, "Abandoned pending request");
        }
        self.is_loading = false;
    }

    pub fn selected_form_id(&self) -> Option<String> {
        self.forms.get(self.selected_form).map(|f| f.id.clone())
    }

    pub fn selected_fill_field(&self) -> Option<&Field> {
        self.fill_form
            .as_ref()
            .and_then(|f| f.fields().nth(self.fill_selected))
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            screen: self.screen,
            api_url: self.api_url.clone(),
            forms: self.forms.clone(),
            selected_form: self.selected_form,
            forms_error: self.forms_error.clone(),
            draft: self.draft.clone(),
            builder_panel: self.builder_panel,
            palette_selected: self.palette_selected,
            canvas_selected: self.canvas_selected,
            drag: self.drag.clone(),
            drop_position: self.drop_position,
            option_input: self.option_input.clone(),
            share_link: self.share_link.clone(),
            fill_form: self.fill_form.clone(),
            answers: self.answers.clone(),
            fill_selected: self.fill_selected,
            option_cursor: self.option_cursor,
            review: self.review.clone(),
            input_mode: self.input_mode,
            edit_target: self.edit_target,
            is_loading: self.is_loading,
            notice: self.notice.clone(),
            alert: self.alert.clone(),
            show_help: self.show_help,
        }
    }
}
