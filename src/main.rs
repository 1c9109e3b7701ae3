//! Formcraft TUI - Actor-based terminal form builder
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async calls to the forms backend

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use formcraft_tui::app::state::DragItem;
use formcraft_tui::constants::{APP_NAME, APP_VERSION};
use formcraft_tui::messages::ui_events::{key_to_ui_event, BuilderPanel, EditTarget, InputMode, Screen};
use formcraft_tui::models::FieldType;
use formcraft_tui::responses::{display_response, NO_RESPONSES};
use formcraft_tui::ui::{self, answer_lines, focus_style, notice_color, preview_lines, type_color, type_icon};
use formcraft_tui::{AppActor, AppState, Config, FormsClient, NetworkActor};
use formcraft_tui::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(app = APP_NAME, version = APP_VERSION, api_url = %config.api_url, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let client = FormsClient::new(&config.api_url, Duration::from_secs(config.request_timeout_secs));
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(config.api_url.clone()), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.key_context()) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Screen bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_screen_bar(f, state, main_chunks[0]);

    match state.screen {
        Screen::FormList => draw_form_list(f, state, main_chunks[1]),
        Screen::Builder => draw_builder(f, state, main_chunks[1]),
        Screen::Fill => draw_fill(f, state, main_chunks[1]),
        Screen::Responses => draw_responses(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(alert) = &state.alert {
        draw_alert_popup(f, alert, area);
    }
}

fn draw_screen_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let selected = match state.screen {
        Screen::FormList => 0,
        Screen::Builder => 1,
        Screen::Fill => 2,
        Screen::Responses => 3,
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(state.api_url.len() as u16 + 2)])
        .split(area);
    f.render_widget(ui::render_tabs(&["Forms", "Builder", "Fill", "Responses"], selected), chunks[0]);
    f.render_widget(
        Paragraph::new(state.api_url.as_str()).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

fn draw_form_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Recent Forms (n:new e:edit Enter:preview r:responses l:reload) ");

    if let Some(error) = &state.forms_error {
        let p = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    if state.forms.is_empty() {
        let text = if state.is_loading { "Loading..." } else { "No forms created yet." };
        let p = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = state
        .forms
        .iter()
        .map(|form| {
            ListItem::new(Line::from(vec![
                Span::styled(form.title.clone(), Style::default().bold()),
                Span::styled(
                    format!("  Created: {}", form.created_date()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_form));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_builder(f: &mut Frame, state: &RenderState, area: Rect) {
    let share_height = if state.share_link.is_some() { 4 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Form name
            Constraint::Min(5),               // Palette + canvas
            Constraint::Length(share_height), // Share link
        ])
        .split(area);

    draw_title_input(f, state, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(rows[1]);

    draw_palette(f, state, columns[0]);
    draw_canvas(f, state, columns[1]);

    if let Some(link) = &state.share_link {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Share Your Form ");
        let p = Paragraph::new(vec![
            Line::styled("Use the link below to share it:", Style::default().fg(Color::Green)),
            Line::styled(link.clone(), Style::default().fg(Color::Cyan).underlined()),
        ])
        .block(block);
        f.render_widget(p, rows[2]);
    }
}

fn draw_title_input(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.builder_panel == BuilderPanel::Title;
    let is_editing = state.edit_target == Some(EditTarget::Title);
    let mode = if state.draft.is_editing() { "Edit Form" } else { "Form Name" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, is_editing))
        .title(format!(" {} ", mode));

    let content = if state.draft.title.is_empty() && !is_editing {
        Paragraph::new("Enter form name").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.draft.title.as_str())
    };
    f.render_widget(content.block(block), area);

    if is_editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + state.draft.title.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_palette(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.builder_panel == BuilderPanel::Palette;
    let dragged = match state.drag {
        Some(DragItem::Palette(i)) => Some(i),
        _ => None,
    };

    let items: Vec<ListItem> = FieldType::all()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if dragged == Some(i) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(type_color(*t))
            };
            ListItem::new(format!("{}{}", type_icon(*t), t.label())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(is_focused, false))
                .title(" Form Elements "),
        )
        .highlight_style(if is_focused {
            Style::default().bg(Color::DarkGray).bold()
        } else {
            Style::default()
        });

    let mut list_state = ListState::default();
    list_state.select(Some(state.palette_selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_canvas(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.builder_panel == BuilderPanel::Canvas;
    let editing_here = is_focused && state.input_mode == InputMode::Editing;

    let title = match state.drag {
        Some(_) => " Canvas - ↑/↓ choose position, Enter drop, Esc cancel ",
        None => " Canvas (e:label o:option x:del option g:grab K/J:move d:delete) ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if state.drag.is_some() {
            Style::default().fg(Color::Magenta)
        } else {
            focus_style(is_focused, editing_here)
        })
        .title(title);

    let mut lines: Vec<Line> = Vec::new();
    let drop_marker = || Line::styled("  ──── drop here ────", Style::default().fg(Color::Magenta).bold());
    let dragging_field = match state.drag {
        Some(DragItem::Field(i)) => Some(i),
        _ => None,
    };
    let mut selected_line = 0usize;

    if state.draft.fields.is_empty() && state.drag.is_none() {
        lines.push(Line::styled(
            "Drag and drop form elements here (Space on a palette item)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for (i, field) in state.draft.fields.iter().enumerate() {
        if matches!(state.drag, Some(DragItem::Palette(_))) && state.drop_position == i {
            lines.push(drop_marker());
        }
        if let Some(from) = dragging_field {
            if state.drop_position == i && from >= i {
                lines.push(drop_marker());
            }
        }

        let is_selected = is_focused && i == state.canvas_selected;
        if is_selected {
            selected_line = lines.len();
        }
        let label_style = if dragging_field == Some(i) {
            Style::default().fg(Color::DarkGray).italic()
        } else if is_selected {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().bold()
        };
        let cursor = if is_selected { "> " } else { "  " };
        let mut label = field.label.clone();
        if is_selected && state.edit_target == Some(EditTarget::FieldLabel) {
            label.push('▏');
        }
        lines.push(Line::from(vec![
            Span::raw(cursor),
            Span::styled(type_icon(field.field_type), Style::default().fg(type_color(field.field_type))),
            Span::styled(label, label_style),
            Span::styled(format!("  ({})", field.field_type.as_str()), Style::default().fg(Color::DarkGray)),
        ]));
        lines.extend(preview_lines(field));
        if is_selected && state.edit_target == Some(EditTarget::NewOption) {
            lines.push(Line::styled(
                format!("  + {}▏  (Enter adds option, Esc done)", state.option_input),
                Style::default().fg(Color::Yellow),
            ));
        }

        if let Some(from) = dragging_field {
            if state.drop_position == i && from < i {
                lines.push(drop_marker());
            }
        }
    }
    if matches!(state.drag, Some(DragItem::Palette(_))) && state.drop_position >= state.draft.fields.len() {
        lines.push(drop_marker());
    }

    // Keep the selected field on screen
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(4)) as u16;

    let p = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(p, area);
}

fn draw_fill(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(form) = &state.fill_form else {
        let p = Paragraph::new("Loading form...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", form.title))
        .title_bottom(Line::from(" s:submit  ↑/↓ field  ←/→ option  Space choose  e edit ").right_aligned());

    let mut lines: Vec<Line> = Vec::new();
    let mut index = 0usize;
    let mut selected_line = 0usize;
    for section in &form.sections {
        lines.push(Line::styled(
            section.label.clone(),
            Style::default().fg(Color::Blue).bold().underlined(),
        ));
        for field in &section.fields {
            let is_selected = index == state.fill_selected;
            if is_selected {
                selected_line = lines.len();
            }
            let editing = is_selected && state.edit_target == Some(EditTarget::Answer);
            let label_style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().bold()
            };
            lines.push(Line::from(vec![
                Span::raw(if is_selected { "> " } else { "  " }),
                Span::styled(field.label.clone(), label_style),
                Span::styled(if editing { "  (editing, Esc to finish)" } else { "" }, Style::default().fg(Color::Yellow)),
            ]));
            lines.extend(answer_lines(field, &state.answers, is_selected, state.option_cursor));
            index += 1;
        }
        lines.push(Line::raw(""));
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(6)) as u16;
    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}

fn draw_responses(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(review) = &state.review else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Responses for Form {} ", review.form_id));

    if review.is_empty() {
        let p = Paragraph::new(vec![Line::raw(""), Line::styled("No responses", Style::default().bold()), Line::raw(NO_RESPONSES)])
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    for (i, submission) in review.submissions.iter().enumerate() {
        let expanded = review.is_expanded(i);
        let is_selected = i == review.selected;
        if is_selected {
            selected_line = lines.len();
        }
        lines.push(Line::styled(
            format!("{} {} Response {}", if is_selected { ">" } else { " " }, if expanded { "▴" } else { "▾" }, i + 1),
            if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().bold()
            },
        ));
        if expanded {
            for entry in &submission.responses {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {}: ", entry.label), Style::default().fg(Color::DarkGray)),
                    Span::raw(display_response(entry).to_string()),
                ]));
            }
        }
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(4)) as u16;
    let p = Paragraph::new(lines).block(block).scroll((scroll, 0));
    f.render_widget(p, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(notice) = &state.notice {
        let bar = Paragraph::new(format!(" {} ", notice.message))
            .style(Style::default().fg(notice_color(notice.kind)).bold());
        f.render_widget(bar, area);
        return;
    }

    let status = if state.is_loading {
        match state.screen {
            Screen::Builder => " Saving... ",
            Screen::Fill => " Submitting... ",
            _ => " Loading... ",
        }
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Backspace:delete "
    } else {
        match state.screen {
            Screen::FormList => " ↑/↓:select | n:new | Enter:preview | r:responses | ?:help | q:quit ",
            Screen::Builder => " Tab:panel | Space:pick up | a:add | s:save and share | Esc:back | ?:help ",
            Screen::Fill => " s:submit | Esc:back | ?:help ",
            Screen::Responses => " Enter:expand | l:reload | Esc:back | ?:help ",
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    let help_text = r#"
 FORMCRAFT - Keyboard Shortcuts

 FORM LIST
   n                  Create a new form
   e                  Edit selected form
   Enter / p          Preview and fill selected form
   r                  View responses
   l                  Reload

 BUILDER
   Tab / Shift+Tab    Switch panels (name, palette, canvas)
   Space / Enter      Pick up palette item, then drop on canvas
   a                  Append palette item to canvas
   g                  Grab canvas field to move it
   K / J              Move field up / down
   e                  Edit form name or field label
   o                  Add options (Enter after each, Esc done)
   x                  Remove last option
   d                  Delete field
   s / Ctrl+S         Save and share

 FILL
   ↑ / ↓              Select field
   ← / →              Move between options
   Space / Enter      Toggle or select option
   e                  Type an answer (file fields take a path)
   Enter              New line while typing a paragraph answer
   s / Ctrl+S         Submit

 GENERAL
   Esc                Back to form list
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_alert_popup(f: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Alert (any key to close) ")
        .style(Style::default().bg(Color::Black));

    let p = Paragraph::new(message)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(p, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
