//! Command handlers - business logic for processing UI events

use crate::app::state::{DragItem, Notice};
use crate::app::AppState;
use crate::builder::FormDraft;
use crate::messages::network::{FormPurpose, Operation};
use crate::messages::ui_events::{BuilderPanel, EditTarget, InputMode, Screen};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::FieldType;
use crate::renderer::{choice_rows, Widget};
use crate::responses::ResponseReview;

const SHARE_LINK_FAILED: &str = "Form saved, but the share link could not be created.";
const OPTIONS_NOT_SUPPORTED: &str = "Options apply only to checkbox, radio and dropdown fields";

impl AppState {
    // ========================
    // Screens
    // ========================

    pub fn open_form_list(&mut self) -> Option<NetworkCommand> {
        self.screen = Screen::FormList;
        self.stop_editing();
        self.drag = None;
        let id = self.begin_request();
        Some(NetworkCommand::ListForms { id })
    }

    pub fn reload(&mut self) -> Option<NetworkCommand> {
        match self.screen {
            Screen::FormList => self.open_form_list(),
            Screen::Responses => {
                let form_id = self.review.as_ref()?.form_id.clone();
                let id = self.begin_request();
                Some(NetworkCommand::FetchResponses { id, form_id })
            }
            _ => None,
        }
    }

    pub fn new_form(&mut self) {
        self.cancel_request();
        self.screen = Screen::Builder;
        self.draft = FormDraft::new();
        self.builder_panel = BuilderPanel::Title;
        self.palette_selected = 0;
        self.canvas_selected = 0;
        self.drag = None;
        self.share_link = None;
        self.notice = None;
    }

    fn fetch_selected(&mut self, purpose: FormPurpose) -> Option<NetworkCommand> {
        let form_id = self.selected_form_id()?;
        let id = self.begin_request();
        Some(NetworkCommand::FetchForm { id, form_id, purpose })
    }

    pub fn edit_selected_form(&mut self) -> Option<NetworkCommand> {
        self.fetch_selected(FormPurpose::Edit)
    }

    pub fn preview_selected_form(&mut self) -> Option<NetworkCommand> {
        self.fetch_selected(FormPurpose::Fill)
    }

    pub fn view_selected_responses(&mut self) -> Option<NetworkCommand> {
        let form_id = self.selected_form_id()?;
        let id = self.begin_request();
        Some(NetworkCommand::FetchResponses { id, form_id })
    }

    pub fn back(&mut self) -> Option<NetworkCommand> {
        if self.screen == Screen::FormList {
            return None;
        }
        self.notice = None;
        self.open_form_list()
    }

    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        if self.screen == Screen::Builder {
            self.stop_editing();
            self.builder_panel = self.builder_panel.next();
        }
    }

    pub fn prev_panel(&mut self) {
        if self.screen == Screen::Builder {
            self.stop_editing();
            self.builder_panel = self.builder_panel.prev();
        }
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::FormList => {
                if !self.forms.is_empty() {
                    self.selected_form = (self.selected_form + 1).min(self.forms.len() - 1);
                }
            }
            Screen::Builder => {
                if let Some(max) = self.drop_limit() {
                    self.drop_position = (self.drop_position + 1).min(max);
                    return;
                }
                match self.builder_panel {
                    BuilderPanel::Palette => {
                        self.palette_selected = (self.palette_selected + 1).min(FieldType::all().len() - 1);
                    }
                    BuilderPanel::Canvas if !self.draft.fields.is_empty() => {
                        self.canvas_selected = (self.canvas_selected + 1).min(self.draft.fields.len() - 1);
                    }
                    _ => {}
                }
            }
            Screen::Fill => {
                let count = self.fill_form.as_ref().map_or(0, |f| f.field_count());
                if count > 0 {
                    self.fill_selected = (self.fill_selected + 1).min(count - 1);
                    self.option_cursor = 0;
                }
            }
            Screen::Responses => {
                if let Some(review) = self.review.as_mut() {
                    review.select_next();
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::FormList => self.selected_form = self.selected_form.saturating_sub(1),
            Screen::Builder => {
                if self.drag.is_some() {
                    self.drop_position = self.drop_position.saturating_sub(1);
                    return;
                }
                match self.builder_panel {
                    BuilderPanel::Palette => self.palette_selected = self.palette_selected.saturating_sub(1),
                    BuilderPanel::Canvas => self.canvas_selected = self.canvas_selected.saturating_sub(1),
                    BuilderPanel::Title => {}
                }
            }
            Screen::Fill => {
                self.fill_selected = self.fill_selected.saturating_sub(1);
                self.option_cursor = 0;
            }
            Screen::Responses => {
                if let Some(review) = self.review.as_mut() {
                    review.select_prev();
                }
            }
        }
    }

    /// Highest valid drop position for the current drag
    fn drop_limit(&self) -> Option<usize> {
        match self.drag {
            Some(DragItem::Palette(_)) => Some(self.draft.fields.len()),
            Some(DragItem::Field(_)) => Some(self.draft.fields.len().saturating_sub(1)),
            None => None,
        }
    }

    pub fn option_right(&mut self) {
        if let Some(field) = self.selected_fill_field() {
            let rows = choice_rows(field).len();
            if rows > 0 {
                self.option_cursor = (self.option_cursor + 1).min(rows - 1);
            }
        }
    }

    pub fn option_left(&mut self) {
        self.option_cursor = self.option_cursor.saturating_sub(1);
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        let target = match self.screen {
            Screen::Builder => match self.builder_panel {
                BuilderPanel::Title => Some(EditTarget::Title),
                BuilderPanel::Canvas if self.canvas_selected < self.draft.fields.len() => {
                    Some(EditTarget::FieldLabel)
                }
                _ => None,
            },
            Screen::Fill => self
                .selected_fill_field()
                .filter(|f| Widget::for_type(f.field_type).is_typed())
                .map(|_| EditTarget::Answer),
            _ => None,
        };
        if let Some(target) = target {
            self.input_mode = InputMode::Editing;
            self.edit_target = Some(target);
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_target = None;
        self.option_input.clear();
    }

    pub fn enter_char(&mut self, c: char) {
        match self.edit_target {
            Some(EditTarget::Title) => self.draft.title.push(c),
            Some(EditTarget::FieldLabel) => self.draft.push_label_char(self.canvas_selected, c),
            Some(EditTarget::NewOption) => {
                if c == '\n' {
                    let option = std::mem::take(&mut self.option_input);
                    self.draft.add_option(self.canvas_selected, &option);
                } else {
                    self.option_input.push(c);
                }
            }
            Some(EditTarget::Answer) => {
                if let Some(field) = self.selected_fill_field().cloned() {
                    self.answers.input_char(&field, c);
                }
            }
            None => {}
        }
    }

    pub fn delete_char(&mut self) {
        match self.edit_target {
            Some(EditTarget::Title) => {
                self.draft.title.pop();
            }
            Some(EditTarget::FieldLabel) => self.draft.pop_label_char(self.canvas_selected),
            Some(EditTarget::NewOption) => {
                self.option_input.pop();
            }
            Some(EditTarget::Answer) => {
                if let Some(field) = self.selected_fill_field().cloned() {
                    self.answers.backspace(&field);
                }
            }
            None => {}
        }
    }

    // ========================
    // Builder: drag and drop
    // ========================

    pub fn pick_up(&mut self) {
        match self.builder_panel {
            BuilderPanel::Palette => {
                self.drag = Some(DragItem::Palette(self.palette_selected));
                self.builder_panel = BuilderPanel::Canvas;
                self.drop_position = self.draft.fields.len();
            }
            BuilderPanel::Canvas if self.canvas_selected < self.draft.fields.len() => {
                self.drag = Some(DragItem::Field(self.canvas_selected));
                self.drop_position = self.canvas_selected;
            }
            _ => {}
        }
    }

    pub fn drop_here(&mut self) {
        match self.drag.take() {
            Some(DragItem::Palette(i)) => {
                if let Some(field_type) = FieldType::all().get(i) {
                    self.canvas_selected = self.draft.drop_field(*field_type, self.drop_position);
                    tracing::debug!(field_type = field_type.as_str(), at = self.canvas_selected, "Dropped palette item");
                }
            }
            Some(DragItem::Field(from)) => {
                self.canvas_selected = self.draft.move_field(from, self.drop_position);
            }
            None => {}
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn quick_add(&mut self) {
        if let Some(field_type) = FieldType::all().get(self.palette_selected) {
            self.canvas_selected = self.draft.drop_field(*field_type, usize::MAX);
        }
    }

    pub fn move_field_up(&mut self) {
        if self.canvas_selected > 0 {
            self.canvas_selected = self
                .draft
                .move_field(self.canvas_selected, self.canvas_selected - 1);
        }
    }

    pub fn move_field_down(&mut self) {
        if self.canvas_selected + 1 < self.draft.fields.len() {
            self.canvas_selected = self
                .draft
                .move_field(self.canvas_selected, self.canvas_selected + 1);
        }
    }

    pub fn delete_field(&mut self) {
        if self.draft.remove_field(self.canvas_selected).is_some()
            && self.canvas_selected >= self.draft.fields.len()
        {
            self.canvas_selected = self.draft.fields.len().saturating_sub(1);
        }
    }

    pub fn start_option_input(&mut self) {
        match self.draft.fields.get(self.canvas_selected) {
            Some(field) if field.field_type.has_options() => {
                self.input_mode = InputMode::Editing;
                self.edit_target = Some(EditTarget::NewOption);
                self.option_input.clear();
            }
            Some(_) => self.notice = Some(Notice::error(OPTIONS_NOT_SUPPORTED)),
            None => {}
        }
    }

    pub fn remove_last_option(&mut self) {
        if let Some(field) = self.draft.fields.get(self.canvas_selected) {
            if let Some(last) = field.options.len().checked_sub(1) {
                self.draft.remove_option(self.canvas_selected, last);
            }
        }
    }

    pub fn save_form(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }
        self.stop_editing();
        if let Err(message) = self.draft.validate() {
            self.alert = Some(message.to_string());
            return None;
        }
        let form = self.draft.to_form();
        let form_id = self.draft.form_id.clone();
        let id = self.begin_request();
        Some(NetworkCommand::SaveForm { id, form, form_id })
    }

    // ========================
    // Fill
    // ========================

    pub fn choose(&mut self) {
        let Some(field) = self.selected_fill_field().cloned() else {
            return;
        };
        let rows = choice_rows(&field);
        let Some(row) = rows.get(self.option_cursor) else {
            return;
        };
        match Widget::for_type(field.field_type) {
            Widget::CheckboxGroup => self.answers.toggle_choice(&field.label, row),
            Widget::RadioGroup => self.answers.select(&field.label, row),
            // Row 0 is the placeholder
            Widget::Select if self.option_cursor == 0 => self.answers.select(&field.label, ""),
            Widget::Select => self.answers.select(&field.label, row),
            _ => {}
        }
    }

    pub fn submit_form(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }
        self.stop_editing();
        let form = self.fill_form.as_ref()?;
        let form_id = form.id.clone()?;
        if let Err(message) = self.answers.validate(form) {
            self.alert = Some(message);
            return None;
        }
        let entries = self.answers.to_entries(form);
        let files = self.answers.files(form);
        self.notice = None;
        let id = self.begin_request();
        Some(NetworkCommand::SubmitResponses { id, form_id, entries, files })
    }

    // ========================
    // Responses
    // ========================

    pub fn toggle_response(&mut self) {
        if let Some(review) = self.review.as_mut() {
            review.toggle_selected();
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Ignoring stale response");
            return;
        }
        self.pending_request_id = None;
        self.is_loading = false;
        if !self.awaits_on_screen(&response) {
            tracing::debug!(id = response.id(), screen = ?self.screen, "Dropping response for another screen");
            return;
        }

        match response {
            NetworkResponse::FormsListed { forms, .. } => {
                self.forms = forms;
                self.forms_error = None;
                self.selected_form = self.selected_form.min(self.forms.len().saturating_sub(1));
            }
            NetworkResponse::FormLoaded { form, purpose, .. } => match purpose {
                FormPurpose::Fill => {
                    self.fill_form = Some(form);
                    self.answers.clear();
                    self.fill_selected = 0;
                    self.option_cursor = 0;
                    self.notice = None;
                    self.screen = Screen::Fill;
                }
                FormPurpose::Edit => {
                    self.new_form();
                    self.draft = FormDraft::from_form(&form);
                }
            },
            NetworkResponse::FormSaved { form_id, share_link, .. } => {
                let message = if self.draft.is_editing() {
                    "Form updated successfully!"
                } else {
                    "Your form has been created successfully."
                };
                self.draft.form_id = Some(form_id);
                self.notice = Some(match share_link {
                    Some(_) => Notice::success(message),
                    None => Notice::error(SHARE_LINK_FAILED),
                });
                self.share_link = share_link;
            }
            NetworkResponse::Submitted { .. } => {
                self.answers.clear();
                self.notice = Some(Notice::success("Form submitted successfully!"));
            }
            NetworkResponse::ResponsesLoaded { form_id, submissions, .. } => {
                self.review = Some(ResponseReview::new(form_id, submissions));
                self.screen = Screen::Responses;
            }
            NetworkResponse::Failed { operation, detail, .. } => {
                tracing::error!(?operation, %detail, "Request failed");
                let message = operation.failure_message().to_string();
                match operation {
                    Operation::ListForms => self.forms_error = Some(message),
                    Operation::CreateForm | Operation::UpdateForm => self.alert = Some(message),
                    _ => self.notice = Some(Notice::error(message)),
                }
            }
        }
    }

    /// Screens on which a response of this kind may still be applied
    fn awaits_on_screen(&self, response: &NetworkResponse) -> bool {
        let operation = match response {
            NetworkResponse::FormsListed { .. } => Operation::ListForms,
            NetworkResponse::FormLoaded { .. } => Operation::FetchForm,
            NetworkResponse::FormSaved { .. } => Operation::CreateForm,
            NetworkResponse::Submitted { .. } => Operation::Submit,
            NetworkResponse::ResponsesLoaded { .. } => Operation::FetchResponses,
            NetworkResponse::Failed { operation, .. } => *operation,
        };
        match operation {
            Operation::ListForms | Operation::FetchForm => self.screen == Screen::FormList,
            Operation::CreateForm | Operation::UpdateForm => self.screen == Screen::Builder,
            Operation::Submit => self.screen == Screen::Fill,
            Operation::FetchResponses => matches!(self.screen, Screen::FormList | Screen::Responses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NoticeKind;
    use crate::builder::MISSING_TITLE_OR_FIELDS;
    use crate::models::{Field, Form, FormSummary, Section, Submission};

    fn builder_state() -> AppState {
        let mut s = AppState::default();
        s.new_form();
        s
    }

    fn palette_index(t: FieldType) -> usize {
        FieldType::all().iter().position(|x| *x == t).unwrap()
    }

    fn fill_state(fields: Vec<Field>) -> AppState {
        let mut s = AppState::default();
        s.screen = Screen::Fill;
        s.fill_form = Some(Form {
            id: Some("f1".into()),
            title: "T".into(),
            sections: vec![Section::main(fields)],
            created_at: None,
        });
        s
    }

    #[test]
    fn test_drag_palette_item_onto_canvas() {
        let mut s = builder_state();
        s.builder_panel = BuilderPanel::Palette;
        s.palette_selected = palette_index(FieldType::Checkbox);
        s.pick_up();
        assert_eq!(s.builder_panel, BuilderPanel::Canvas);
        assert!(s.drag.is_some());
        s.drop_here();
        assert!(s.drag.is_none());
        assert_eq!(s.draft.fields.len(), 1);
        assert_eq!(s.draft.fields[0].label, "Checkbox");
    }

    #[test]
    fn test_drop_position_is_clamped() {
        let mut s = builder_state();
        s.quick_add();
        s.builder_panel = BuilderPanel::Palette;
        s.palette_selected = palette_index(FieldType::Date);
        s.pick_up();
        s.select_next();
        s.select_next();
        assert_eq!(s.drop_position, 1);
        s.select_prev();
        s.drop_here();
        assert_eq!(s.draft.fields[0].field_type, FieldType::Date);
        assert_eq!(s.canvas_selected, 0);
    }

    #[test]
    fn test_drag_field_reorders() {
        let mut s = builder_state();
        for t in [FieldType::Text, FieldType::Radio, FieldType::File] {
            s.palette_selected = palette_index(t);
            s.quick_add();
        }
        s.builder_panel = BuilderPanel::Canvas;
        s.canvas_selected = 2;
        s.pick_up();
        s.select_prev();
        s.select_prev();
        s.drop_here();
        let types: Vec<_> = s.draft.fields.iter().map(|f| f.field_type).collect();
        assert_eq!(types, vec![FieldType::File, FieldType::Text, FieldType::Radio]);
        assert_eq!(s.canvas_selected, 0);
    }

    #[test]
    fn test_option_input_commits_on_newline() {
        let mut s = builder_state();
        s.palette_selected = palette_index(FieldType::Dropdown);
        s.quick_add();
        s.builder_panel = BuilderPanel::Canvas;
        s.start_option_input();
        assert_eq!(s.edit_target, Some(EditTarget::NewOption));
        for c in "Blue\nRed\n".chars() {
            s.enter_char(c);
        }
        assert_eq!(s.draft.fields[0].options, vec!["Blue", "Red"]);
        s.remove_last_option();
        assert_eq!(s.draft.fields[0].options, vec!["Blue"]);
    }

    #[test]
    fn test_option_input_refused_for_text_field() {
        let mut s = builder_state();
        s.quick_add();
        s.start_option_input();
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.notice.as_ref().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_save_without_title_alerts_and_sends_nothing() {
        let mut s = builder_state();
        s.quick_add();
        assert!(s.save_form().is_none());
        assert_eq!(s.alert.as_deref(), Some(MISSING_TITLE_OR_FIELDS));
        assert!(s.pending_request_id.is_none());
    }

    #[test]
    fn test_save_then_share_link() {
        let mut s = builder_state();
        s.start_editing();
        for c in "Poll".chars() {
            s.enter_char(c);
        }
        s.quick_add();
        let cmd = s.save_form().unwrap();
        let id = match cmd {
            NetworkCommand::SaveForm { id, form, form_id } => {
                assert_eq!(form.title, "Poll");
                assert!(form_id.is_none());
                id
            }
            other => panic!("unexpected {:?}", other),
        };
        s.handle_response(NetworkResponse::FormSaved {
            id,
            form_id: "abc".into(),
            share_link: Some("http://localhost:3000/form/abc".into()),
        });
        assert!(!s.is_loading);
        assert_eq!(s.share_link.as_deref(), Some("http://localhost:3000/form/abc"));
        assert_eq!(s.draft.form_id.as_deref(), Some("abc"));

        // Saving again updates the same form
        match s.save_form().unwrap() {
            NetworkCommand::SaveForm { form_id, .. } => assert_eq!(form_id.as_deref(), Some("abc")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut s = AppState::default();
        s.open_form_list();
        s.handle_response(NetworkResponse::FormsListed { id: 99, forms: vec![] });
        assert!(s.is_loading);
    }

    #[test]
    fn test_late_form_after_new_form_keeps_builder() {
        let mut s = AppState::default();
        s.forms = vec![FormSummary { id: "p1".into(), title: "Poll".into(), created_at: None }];
        let id = match s.preview_selected_form().unwrap() {
            NetworkCommand::FetchForm { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        s.new_form();
        assert!(!s.is_loading);
        assert!(s.pending_request_id.is_none());

        let form = Form {
            id: Some("p1".into()),
            title: "Poll".into(),
            sections: vec![Section::main(vec![Field::new(FieldType::Text, "Name")])],
            created_at: None,
        };
        s.handle_response(NetworkResponse::FormLoaded { id, form, purpose: FormPurpose::Fill });
        assert_eq!(s.screen, Screen::Builder);
        assert!(s.fill_form.is_none());
        assert!(s.draft.fields.is_empty());
    }

    #[test]
    fn test_form_loaded_off_list_screen_is_dropped() {
        let mut s = AppState::default();
        s.forms = vec![FormSummary { id: "e1".into(), title: "E".into(), created_at: None }];
        let id = match s.edit_selected_form().unwrap() {
            NetworkCommand::FetchForm { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        s.screen = Screen::Responses;
        let form = Form { id: Some("e1".into()), title: "E".into(), sections: vec![], created_at: None };
        s.handle_response(NetworkResponse::FormLoaded { id, form, purpose: FormPurpose::Edit });
        assert_eq!(s.screen, Screen::Responses);
        assert!(!s.draft.is_editing());
        assert!(!s.is_loading);
    }

    #[test]
    fn test_save_in_flight_blocks_second_save() {
        let mut s = builder_state();
        s.draft.title = "Poll".into();
        s.quick_add();
        let id = match s.save_form().unwrap() {
            NetworkCommand::SaveForm { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        assert!(s.save_form().is_none());
        assert_eq!(s.pending_request_id, Some(id));

        s.handle_response(NetworkResponse::Failed { id, operation: Operation::CreateForm, detail: String::new() });
        assert!(s.save_form().is_some());
    }

    #[test]
    fn test_submit_in_flight_blocks_second_submit() {
        let mut s = fill_state(vec![Field::new(FieldType::Text, "Name")]);
        let id = match s.submit_form().unwrap() {
            NetworkCommand::SubmitResponses { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        assert!(s.submit_form().is_none());
        assert_eq!(s.pending_request_id, Some(id));

        s.handle_response(NetworkResponse::Submitted { id });
        assert!(s.submit_form().is_some());
    }

    #[test]
    fn test_share_failure_keeps_created_form_id() {
        let mut s = builder_state();
        s.draft.title = "Poll".into();
        s.quick_add();
        let id = match s.save_form().unwrap() {
            NetworkCommand::SaveForm { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        s.handle_response(NetworkResponse::FormSaved { id, form_id: "n1".into(), share_link: None });
        assert!(s.share_link.is_none());
        assert_eq!(s.notice, Some(Notice::error(SHARE_LINK_FAILED)));

        // Retrying updates the stored form rather than creating another
        match s.save_form().unwrap() {
            NetworkCommand::SaveForm { form_id, .. } => assert_eq!(form_id.as_deref(), Some("n1")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_list_failure_sets_inline_error() {
        let mut s = AppState::default();
        let id = match s.open_form_list().unwrap() {
            NetworkCommand::ListForms { id } => id,
            other => panic!("unexpected {:?}", other),
        };
        s.handle_response(NetworkResponse::Failed {
            id,
            operation: Operation::ListForms,
            detail: "refused".into(),
        });
        assert_eq!(s.forms_error.as_deref(), Some("Failed to fetch forms. Please try again later."));
    }

    #[test]
    fn test_edit_selected_loads_into_builder() {
        let mut s = AppState::default();
        s.forms = vec![FormSummary { id: "x1".into(), title: "Old".into(), created_at: None }];
        let id = match s.edit_selected_form().unwrap() {
            NetworkCommand::FetchForm { id, form_id, purpose } => {
                assert_eq!(form_id, "x1");
                assert_eq!(purpose, FormPurpose::Edit);
                id
            }
            other => panic!("unexpected {:?}", other),
        };
        let form = Form {
            id: Some("x1".into()),
            title: "Old".into(),
            sections: vec![Section::main(vec![Field::new(FieldType::Text, "Name")])],
            created_at: None,
        };
        s.handle_response(NetworkResponse::FormLoaded { id, form, purpose: FormPurpose::Edit });
        assert_eq!(s.screen, Screen::Builder);
        assert!(s.draft.is_editing());
        assert_eq!(s.draft.fields.len(), 1);
    }

    #[test]
    fn test_fill_checkbox_and_submit() {
        let mut f = Field::new(FieldType::Checkbox, "Pets");
        f.options = vec!["Cat".into(), "Dog".into()];
        let mut s = fill_state(vec![Field::new(FieldType::Text, "Name"), f]);
        s.start_editing();
        s.enter_char('A');
        s.stop_editing();
        s.select_next();
        s.choose();
        s.option_right();
        s.option_right();
        s.choose();
        let cmd = s.submit_form().unwrap();
        match cmd {
            NetworkCommand::SubmitResponses { form_id, entries, files, .. } => {
                assert_eq!(form_id, "f1");
                assert!(files.is_empty());
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[1].response, "Cat, Dog");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_dropdown_placeholder_clears() {
        let mut f = Field::new(FieldType::Dropdown, "Size");
        f.options = vec!["S".into(), "M".into()];
        let mut s = fill_state(vec![f]);
        s.option_right();
        s.choose();
        assert!(s.answers.is_chosen("Size", "S"));
        s.option_left();
        s.choose();
        assert_eq!(s.answers.text("Size"), "");
    }

    #[test]
    fn test_submit_success_and_failure_notices() {
        let mut s = fill_state(vec![Field::new(FieldType::Text, "Name")]);
        let id = match s.submit_form().unwrap() {
            NetworkCommand::SubmitResponses { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        s.handle_response(NetworkResponse::Failed { id, operation: Operation::Submit, detail: String::new() });
        assert_eq!(
            s.notice,
            Some(Notice::error("Failed to submit form. Please try again."))
        );

        let id = match s.submit_form().unwrap() {
            NetworkCommand::SubmitResponses { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        s.handle_response(NetworkResponse::Submitted { id });
        assert_eq!(s.notice, Some(Notice::success("Form submitted successfully!")));
    }

    #[test]
    fn test_responses_loaded_and_toggled() {
        let mut s = AppState::default();
        s.forms = vec![FormSummary { id: "r".into(), title: "R".into(), created_at: None }];
        let id = match s.view_selected_responses().unwrap() {
            NetworkCommand::FetchResponses { id, .. } => id,
            other => panic!("unexpected {:?}", other),
        };
        s.handle_response(NetworkResponse::ResponsesLoaded {
            id,
            form_id: "r".into(),
            submissions: vec![Submission { responses: vec![] }],
        });
        assert_eq!(s.screen, Screen::Responses);
        s.toggle_response();
        assert!(s.review.as_ref().unwrap().is_expanded(0));
        assert!(matches!(s.reload(), Some(NetworkCommand::FetchResponses { .. })));
    }
}
