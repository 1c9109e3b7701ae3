//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{DragItem, Notice};
use crate::builder::FormDraft;
use crate::messages::ui_events::{BuilderPanel, EditTarget, InputMode, KeyContext, Screen};
use crate::models::{Form, FormSummary};
use crate::renderer::{AnswerSheet, Widget};
use crate::responses::ResponseReview;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
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

    // Shared UI state
    pub input_mode: InputMode,
    pub edit_target: Option<EditTarget>,
    pub is_loading: bool,
    pub notice: Option<Notice>,
    pub alert: Option<String>,
    pub show_help: bool,
}

impl RenderState {
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            screen: self.screen,
            panel: self.builder_panel,
            input_mode: self.input_mode,
            edit_target: self.edit_target,
            dragging: self.drag.is_some(),
            selected_is_choice: self.selected_fill_widget().map_or(false, |w| w.is_choice()),
            selected_is_multiline: self.selected_fill_widget() == Some(Widget::TextArea),
            show_help: self.show_help,
            show_alert: self.alert.is_some(),
        }
    }

    pub fn selected_fill_widget(&self) -> Option<Widget> {
        self.fill_form
            .as_ref()
            .and_then(|f| f.fields().nth(self.fill_selected))
            .map(|f| Widget::for_type(f.field_type))
    }
}
