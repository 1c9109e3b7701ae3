use ratatui::{prelude::*, widgets::*};

use crate::app::state::NoticeKind;
use crate::models::{Field, FieldType};
use crate::renderer::{choice_rows, AnswerSheet, Widget};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Glyph shown next to a field type in the palette and on the canvas
pub fn type_icon(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "T ",
        FieldType::Textarea => "¶ ",
        FieldType::Number => "# ",
        FieldType::Date => "▦ ",
        FieldType::Checkbox => "☑ ",
        FieldType::Radio => "◉ ",
        FieldType::Dropdown => "▾ ",
        FieldType::File => "⇪ ",
    }
}

pub fn type_color(field_type: FieldType) -> Color {
    match field_type {
        FieldType::Text | FieldType::Textarea => Color::Cyan,
        FieldType::Number | FieldType::Date => Color::Yellow,
        FieldType::Checkbox | FieldType::Radio | FieldType::Dropdown => Color::Magenta,
        FieldType::File => Color::Green,
    }
}

pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    }
}

/// Border style for a panel given focus and edit state
pub fn focus_style(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Builder preview of a field's widget (no answers)
pub fn preview_lines(field: &Field) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    match Widget::for_type(field.field_type) {
        Widget::TextInput => vec![Line::styled("  [ Text input            ]", dim)],
        Widget::TextArea => vec![
            Line::styled("  [ Enter text here       ]", dim),
            Line::styled("  [                       ]", dim),
        ],
        Widget::NumberInput => vec![Line::styled("  [ 0                     ]", dim)],
        Widget::DateInput => vec![Line::styled("  [ YYYY-MM-DD            ]", dim)],
        Widget::FilePicker => vec![Line::styled("  [ Choose file...        ]", dim)],
        Widget::CheckboxGroup | Widget::RadioGroup | Widget::Select => {
            let marker = match field.field_type {
                FieldType::Checkbox => "[ ]",
                FieldType::Radio => "( )",
                _ => " - ",
            };
            if field.options.is_empty() {
                vec![Line::styled("  (no options yet, press 'o' to add)", dim)]
            } else {
                choice_rows(field)
                    .into_iter()
                    .map(|o| Line::styled(format!("  {} {}", marker, o), dim))
                    .collect()
            }
        }
    }
}

/// Fill-screen rendering of a field's widget with its current answer
pub fn answer_lines(
    field: &Field,
    answers: &AnswerSheet,
    is_selected: bool,
    option_cursor: usize,
) -> Vec<Line<'static>> {
    let widget = Widget::for_type(field.field_type);
    let value_style = Style::default().fg(Color::White);
    let placeholder = Style::default().fg(Color::DarkGray);

    if widget.is_typed() {
        let value = match widget {
            Widget::FilePicker => answers.file_input(&field.label),
            _ => answers.text(&field.label).to_string(),
        };
        if value.is_empty() {
            let hint = match widget {
                Widget::DateInput => "YYYY-MM-DD",
                Widget::NumberInput => "number",
                Widget::FilePicker => "path to file (e to edit)",
                _ => "e to edit",
            };
            return vec![Line::styled(format!("  [ {} ]", hint), placeholder)];
        }
        return value
            .lines()
            .map(|l| Line::styled(format!("  {}", l), value_style))
            .collect();
    }

    let rows = choice_rows(field);
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let chosen = answers.is_chosen(&field.label, &row);
            let marker = match widget {
                Widget::CheckboxGroup => if chosen { "[x]" } else { "[ ]" },
                Widget::RadioGroup => if chosen { "(•)" } else { "( )" },
                _ if i == 0 => "   ",
                _ => if chosen { " ▸ " } else { "   " },
            };
            let style = if is_selected && i == option_cursor {
                Style::default().fg(Color::Yellow).bold()
            } else if chosen {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Line::styled(format!("  {} {}", marker, row), style)
        })
        .collect()
}
