//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Application screens
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Screen {
    #[default]
    FormList,
    Builder,
    Fill,
    Responses,
}

/// Focusable panel of the builder screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BuilderPanel {
    #[default]
    Title,
    Palette,
    Canvas,
}

impl BuilderPanel {
    pub fn next(&self) -> BuilderPanel {
        match self {
            BuilderPanel::Title => BuilderPanel::Palette,
            BuilderPanel::Palette => BuilderPanel::Canvas,
            BuilderPanel::Canvas => BuilderPanel::Title,
        }
    }

    pub fn prev(&self) -> BuilderPanel {
        match self {
            BuilderPanel::Title => BuilderPanel::Canvas,
            BuilderPanel::Palette => BuilderPanel::Title,
            BuilderPanel::Canvas => BuilderPanel::Palette,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What typed characters go into while editing
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditTarget {
    Title,
    FieldLabel,
    NewOption,
    Answer,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Form list
    NewForm,
    EditSelectedForm,
    PreviewSelectedForm,
    ViewSelectedResponses,
    Reload,
    Back,

    // Navigation
    NextPanel,
    PrevPanel,
    SelectNext,
    SelectPrev,
    OptionLeft,
    OptionRight,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,

    // Builder: drag and drop
    PickUp,
    DropHere,
    CancelDrag,
    QuickAdd,
    MoveFieldUp,
    MoveFieldDown,
    DeleteField,
    StartOptionInput,
    RemoveLastOption,
    SaveForm,

    // Fill
    Choose,
    SubmitForm,

    // Responses
    ToggleResponse,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissAlert,

    // System
    Quit,
}

/// The slice of render state needed to interpret a key press
#[derive(Clone, Copy, Debug)]
pub struct KeyContext {
    pub screen: Screen,
    pub panel: BuilderPanel,
    pub input_mode: InputMode,
    pub edit_target: Option<EditTarget>,
    pub dragging: bool,
    pub selected_is_choice: bool,
    pub selected_is_multiline: bool,
    pub show_help: bool,
    pub show_alert: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') => {
                return match ctx.screen {
                    Screen::Builder => Some(UiEvent::SaveForm),
                    Screen::Fill => Some(UiEvent::SubmitForm),
                    _ => None,
                }
            }
            _ => {}
        }
    }

    // Popups swallow the key
    if ctx.show_alert {
        return Some(UiEvent::DismissAlert);
    }
    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    if ctx.input_mode == InputMode::Editing {
        return handle_editing_keys(key, ctx);
    }

    if ctx.screen == Screen::Builder && ctx.dragging {
        return match key.code {
            KeyCode::Up => Some(UiEvent::SelectPrev),
            KeyCode::Down => Some(UiEvent::SelectNext),
            KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::DropHere),
            KeyCode::Esc => Some(UiEvent::CancelDrag),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') if ctx.screen == Screen::FormList => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Esc => return Some(UiEvent::Back),
        KeyCode::Up => return Some(UiEvent::SelectPrev),
        KeyCode::Down => return Some(UiEvent::SelectNext),
        _ => {}
    }

    match ctx.screen {
        Screen::FormList => handle_list_keys(key),
        Screen::Builder => handle_builder_keys(key, ctx.panel),
        Screen::Fill => handle_fill_keys(key, ctx.selected_is_choice),
        Screen::Responses => handle_responses_keys(key),
    }
}

fn handle_editing_keys(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        // Enter commits the option and keeps the input open
        KeyCode::Enter if ctx.edit_target == Some(EditTarget::NewOption) => Some(UiEvent::CharInput('\n')),
        KeyCode::Enter if ctx.edit_target == Some(EditTarget::Answer) && ctx.selected_is_multiline => {
            Some(UiEvent::CharInput('\n'))
        }
        KeyCode::Enter => Some(UiEvent::StopEditing),
        KeyCode::Tab if ctx.screen == Screen::Builder => Some(UiEvent::NextPanel),
        _ => None,
    }
}

fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('n') => Some(UiEvent::NewForm),
        KeyCode::Char('e') => Some(UiEvent::EditSelectedForm),
        KeyCode::Char('p') | KeyCode::Enter => Some(UiEvent::PreviewSelectedForm),
        KeyCode::Char('r') => Some(UiEvent::ViewSelectedResponses),
        KeyCode::Char('l') => Some(UiEvent::Reload),
        _ => None,
    }
}

fn handle_builder_keys(key: KeyEvent, panel: BuilderPanel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('s') => Some(UiEvent::SaveForm),
        _ => match panel {
            BuilderPanel::Title => match key.code {
                KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
                _ => None,
            },
            BuilderPanel::Palette => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::PickUp),
                KeyCode::Char('a') => Some(UiEvent::QuickAdd),
                _ => None,
            },
            BuilderPanel::Canvas => match key.code {
                KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
                KeyCode::Char('g') | KeyCode::Char(' ') => Some(UiEvent::PickUp),
                KeyCode::Char('K') => Some(UiEvent::MoveFieldUp),
                KeyCode::Char('J') => Some(UiEvent::MoveFieldDown),
                KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteField),
                KeyCode::Char('o') => Some(UiEvent::StartOptionInput),
                KeyCode::Char('x') => Some(UiEvent::RemoveLastOption),
                _ => None,
            },
        },
    }
}

fn handle_fill_keys(key: KeyEvent, selected_is_choice: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('s') => Some(UiEvent::SubmitForm),
        KeyCode::Left => Some(UiEvent::OptionLeft),
        KeyCode::Right => Some(UiEvent::OptionRight),
        KeyCode::Enter | KeyCode::Char(' ') if selected_is_choice => Some(UiEvent::Choose),
        KeyCode::Enter | KeyCode::Char('e') => Some(UiEvent::StartEditing),
        _ => None,
    }
}

fn handle_responses_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ToggleResponse),
        KeyCode::Char('l') => Some(UiEvent::Reload),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(screen: Screen) -> KeyContext {
        KeyContext {
            screen,
            panel: BuilderPanel::Canvas,
            input_mode: InputMode::Normal,
            edit_target: None,
            dragging: false,
            selected_is_choice: false,
            selected_is_multiline: false,
            show_help: false,
            show_alert: false,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_alert_swallows_keys() {
        let mut c = ctx(Screen::Builder);
        c.show_alert = true;
        assert!(matches!(key_to_ui_event(press(KeyCode::Char('d')), c), Some(UiEvent::DismissAlert)));
    }

    #[test]
    fn test_enter_while_dragging_drops() {
        let mut c = ctx(Screen::Builder);
        c.dragging = true;
        assert!(matches!(key_to_ui_event(press(KeyCode::Enter), c), Some(UiEvent::DropHere)));
        assert!(matches!(key_to_ui_event(press(KeyCode::Esc), c), Some(UiEvent::CancelDrag)));
    }

    #[test]
    fn test_enter_in_option_input_commits() {
        let mut c = ctx(Screen::Builder);
        c.input_mode = InputMode::Editing;
        c.edit_target = Some(EditTarget::NewOption);
        assert!(matches!(key_to_ui_event(press(KeyCode::Enter), c), Some(UiEvent::CharInput('\n'))));
        c.edit_target = Some(EditTarget::Title);
        assert!(matches!(key_to_ui_event(press(KeyCode::Enter), c), Some(UiEvent::StopEditing)));
    }

    #[test]
    fn test_enter_in_paragraph_answer_adds_newline() {
        let mut c = ctx(Screen::Fill);
        c.input_mode = InputMode::Editing;
        c.edit_target = Some(EditTarget::Answer);
        assert!(matches!(key_to_ui_event(press(KeyCode::Enter), c), Some(UiEvent::StopEditing)));
        c.selected_is_multiline = true;
        assert!(matches!(key_to_ui_event(press(KeyCode::Enter), c), Some(UiEvent::CharInput('\n'))));
        assert!(matches!(key_to_ui_event(press(KeyCode::Esc), c), Some(UiEvent::StopEditing)));
    }

    #[test]
    fn test_fill_enter_depends_on_widget() {
        let mut c = ctx(Screen::Fill);
        assert!(matches!(key_to_ui_event(press(KeyCode::Enter), c), Some(UiEvent::StartEditing)));
        c.selected_is_choice = true;
        assert!(matches!(key_to_ui_event(press(KeyCode::Enter), c), Some(UiEvent::Choose)));
    }

    #[test]
    fn test_ctrl_s_per_screen() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(matches!(key_to_ui_event(key, ctx(Screen::Builder)), Some(UiEvent::SaveForm)));
        assert!(matches!(key_to_ui_event(key, ctx(Screen::Fill)), Some(UiEvent::SubmitForm)));
        assert!(key_to_ui_event(key, ctx(Screen::FormList)).is_none());
    }

    #[test]
    fn test_q_only_quits_from_list() {
        assert!(matches!(key_to_ui_event(press(KeyCode::Char('q')), ctx(Screen::FormList)), Some(UiEvent::Quit)));
        assert!(key_to_ui_event(press(KeyCode::Char('q')), ctx(Screen::Responses)).is_none());
    }
}
