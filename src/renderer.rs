//! Form renderer - maps field types to input widgets and tracks answers
//!
//! Answers are keyed by field label. Only fields the respondent touched end up
//! in the submission.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::constants::SELECT_PLACEHOLDER;
use crate::models::{Field, FieldType, Form, ResponseEntry};

/// Input widget used for a field type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Widget {
    TextInput,
    TextArea,
    NumberInput,
    DateInput,
    CheckboxGroup,
    RadioGroup,
    Select,
    FilePicker,
}

impl Widget {
    pub fn for_type(field_type: FieldType) -> Widget {
        match field_type {
            FieldType::Text => Widget::TextInput,
            FieldType::Textarea => Widget::TextArea,
            FieldType::Number => Widget::NumberInput,
            FieldType::Date => Widget::DateInput,
            FieldType::Checkbox => Widget::CheckboxGroup,
            FieldType::Radio => Widget::RadioGroup,
            FieldType::Dropdown => Widget::Select,
            FieldType::File => Widget::FilePicker,
        }
    }

    /// Widgets edited by typing characters
    pub fn is_typed(&self) -> bool {
        matches!(
            self,
            Widget::TextInput | Widget::TextArea | Widget::NumberInput | Widget::DateInput | Widget::FilePicker
        )
    }

    /// Widgets that pick from the field's options
    pub fn is_choice(&self) -> bool {
        matches!(self, Widget::CheckboxGroup | Widget::RadioGroup | Widget::Select)
    }

    /// Whether `c` may be typed into this widget given the current text
    pub fn accepts(&self, current: &str, c: char) -> bool {
        match self {
            Widget::NumberInput => c.is_ascii_digit() || c == '.' || (c == '-' && current.is_empty()),
            Widget::DateInput => current.len() < 10 && (c.is_ascii_digit() || c == '-'),
            Widget::TextArea => true,
            _ => !c.is_control(),
        }
    }
}

/// Rows a choice widget offers; selects start with a placeholder row
pub fn choice_rows(field: &Field) -> Vec<String> {
    let widget = Widget::for_type(field.field_type);
    if !widget.is_choice() || field.options.is_empty() {
        return Vec::new();
    }
    let mut rows = Vec::with_capacity(field.options.len() + 1);
    if widget == Widget::Select {
        rows.push(SELECT_PLACEHOLDER.to_string());
    }
    rows.extend(field.options.iter().cloned());
    rows
}

/// Answer for one field
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
    File(PathBuf),
}

impl Answer {
    pub fn as_response(&self) -> String {
        match self {
            Answer::Text(s) => s.clone(),
            Answer::Choices(values) => values.join(", "),
            Answer::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}

/// Respondent's answers to one form
#[derive(Clone, Debug, Default)]
pub struct AnswerSheet {
    answers: HashMap<String, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a typed answer, empty when untouched
    pub fn text(&self, label: &str) -> &str {
        match self.answers.get(label) {
            Some(Answer::Text(s)) => s,
            _ => "",
        }
    }

    pub fn file_input(&self, label: &str) -> String {
        match self.answers.get(label) {
            Some(Answer::File(p)) => p.to_string_lossy().into_owned(),
            Some(Answer::Text(s)) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn is_chosen(&self, label: &str, option: &str) -> bool {
        match self.answers.get(label) {
            Some(Answer::Choices(values)) => values.iter().any(|v| v == option),
            Some(Answer::Text(s)) => s == option,
            _ => false,
        }
    }

    /// Type a character into the field's widget; rejected characters are dropped
    pub fn input_char(&mut self, field: &Field, c: char) -> bool {
        let widget = Widget::for_type(field.field_type);
        if !widget.is_typed() {
            return false;
        }
        let mut current = match widget {
            Widget::FilePicker => self.file_input(&field.label),
            _ => self.text(&field.label).to_string(),
        };
        if !widget.accepts(&current, c) {
            return false;
        }
        current.push(c);
        self.store_typed(field, widget, current);
        true
    }

    pub fn backspace(&mut self, field: &Field) {
        let widget = Widget::for_type(field.field_type);
        if !widget.is_typed() {
            return;
        }
        let mut current = match widget {
            Widget::FilePicker => self.file_input(&field.label),
            _ => self.text(&field.label).to_string(),
        };
        current.pop();
        self.store_typed(field, widget, current);
    }

    fn store_typed(&mut self, field: &Field, widget: Widget, value: String) {
        let answer = if widget == Widget::FilePicker {
            if value.is_empty() {
                self.answers.remove(&field.label);
                return;
            }
            Answer::File(PathBuf::from(value))
        } else {
            Answer::Text(value)
        };
        self.answers.insert(field.label.clone(), answer);
    }

    /// Checkbox: add the option when absent, remove it when present
    pub fn toggle_choice(&mut self, label: &str, option: &str) {
        let entry = self
            .answers
            .entry(label.to_string())
            .or_insert_with(|| Answer::Choices(Vec::new()));
        match entry {
            Answer::Choices(values) => {
                if let Some(pos) = values.iter().position(|v| v == option) {
                    values.remove(pos);
                } else {
                    values.push(option.to_string());
                }
            }
            other => *other = Answer::Choices(vec![option.to_string()]),
        }
    }

    /// Radio or dropdown: replace the selection
    pub fn select(&mut self, label: &str, option: &str) {
        self.answers
            .insert(label.to_string(), Answer::Text(option.to_string()));
    }

    pub fn attach_file(&mut self, label: &str, path: impl Into<PathBuf>) {
        self.answers.insert(label.to_string(), Answer::File(path.into()));
    }

    /// Touched answers in form order
    pub fn to_entries(&self, form: &Form) -> Vec<ResponseEntry> {
        form.fields()
            .filter(|f| f.field_type != FieldType::File)
            .filter_map(|f| {
                self.answers.get(&f.label).map(|a| ResponseEntry {
                    label: f.label.clone(),
                    response: a.as_response(),
                })
            })
            .collect()
    }

    /// Attachments as (field label, path)
    pub fn files(&self, form: &Form) -> Vec<(String, PathBuf)> {
        form.fields()
            .filter_map(|f| match self.answers.get(&f.label) {
                Some(Answer::File(p)) => Some((f.label.clone(), p.clone())),
                _ => None,
            })
            .collect()
    }

    /// Check typed answers before submitting
    pub fn validate(&self, form: &Form) -> Result<(), String> {
        for field in form.fields() {
            let Some(answer) = self.answers.get(&field.label) else {
                continue;
            };
            match (field.field_type, answer) {
                (FieldType::Number, Answer::Text(s)) if !s.is_empty() => {
                    if s.parse::<f64>().is_err() {
                        return Err(format!("{}: \"{}\" is not a number", field.label, s));
                    }
                }
                (FieldType::Date, Answer::Text(s)) if !s.is_empty() => {
                    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
                        return Err(format!("{}: \"{}\" is not a date (YYYY-MM-DD)", field.label, s));
                    }
                }
                (FieldType::File, Answer::File(p)) => {
                    if !p.is_file() {
                        return Err(format!("{}: file {} not found", field.label, p.display()));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
