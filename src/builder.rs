//! Form builder canvas
//!
//! Holds the draft being assembled: a title and an ordered list of fields.
//! Palette drops insert fields, canvas drags reorder them.

use crate::constants::MAIN_SECTION_LABEL;
use crate::models::{Field, FieldType, Form, Section};

pub const MISSING_TITLE_OR_FIELDS: &str = "Please provide a form name and add at least one field.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormDraft {
    pub title: String,
    pub fields: Vec<Field>,
    /// Set when editing a form that already exists on the backend
    pub form_id: Option<String>,
    section_label: Option<String>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing form for editing
    pub fn from_form(form: &Form) -> Self {
        FormDraft {
            title: form.title.clone(),
            fields: form.fields().cloned().collect(),
            form_id: form.id.clone(),
            section_label: form.sections.first().map(|s| s.label.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.form_id.is_some()
    }

    /// Drop a palette item at `at`; positions past the end append.
    /// Returns the index of the new field.
    pub fn drop_field(&mut self, field_type: FieldType, at: usize) -> usize {
        let index = at.min(self.fields.len());
        self.fields.insert(index, Field::new(field_type, field_type.label()));
        index
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.label = label.into();
        }
    }

    pub fn push_label_char(&mut self, index: usize, c: char) {
        if let Some(field) = self.fields.get_mut(index) {
            field.label.push(c);
        }
    }

    pub fn pop_label_char(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.label.pop();
        }
    }

    /// Append an option; ignored for types without options and for blank input
    pub fn add_option(&mut self, index: usize, option: &str) -> bool {
        let option = option.trim();
        match self.fields.get_mut(index) {
            Some(field) if field.field_type.has_options() && !option.is_empty() => {
                field.options.push(option.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn remove_option(&mut self, index: usize, option_index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            if option_index < field.options.len() {
                field.options.remove(option_index);
            }
        }
    }

    pub fn remove_field(&mut self, index: usize) -> Option<Field> {
        if index < self.fields.len() {
            Some(self.fields.remove(index))
        } else {
            None
        }
    }

    /// Move a field to a new position, clamped to the canvas
    pub fn move_field(&mut self, from: usize, to: usize) -> usize {
        if from >= self.fields.len() {
            return from;
        }
        let field = self.fields.remove(from);
        let to = to.min(self.fields.len());
        self.fields.insert(to, field);
        to
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() || self.fields.is_empty() {
            return Err(MISSING_TITLE_OR_FIELDS);
        }
        Ok(())
    }

    /// Payload for create/update
    pub fn to_form(&self) -> Form {
        let label = self
            .section_label
            .clone()
            .unwrap_or_else(|| MAIN_SECTION_LABEL.to_string());
        Form {
            id: None,
            title: self.title.clone(),
            sections: vec![Section { label, fields: self.fields.clone() }],
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with(types: &[FieldType]) -> FormDraft {
        let mut d = FormDraft::new();
        for t in types {
            d.drop_field(*t, usize::MAX);
        }
        d
    }

    #[test]
    fn test_drop_checkbox_on_empty_canvas() {
        let mut d = FormDraft::new();
        let idx = d.drop_field(FieldType::Checkbox, 0);
        assert_eq!(idx, 0);
        assert_eq!(d.fields.len(), 1);
        assert_eq!(d.fields[0].label, "Checkbox");
        assert_eq!(d.fields[0].field_type, FieldType::Checkbox);
        assert!(d.fields[0].options.is_empty());
    }

    #[test]
    fn test_drop_between_fields() {
        let mut d = draft_with(&[FieldType::Text, FieldType::Date]);
        d.drop_field(FieldType::File, 1);
        let types: Vec<_> = d.fields.iter().map(|f| f.field_type).collect();
        assert_eq!(types, vec![FieldType::Text, FieldType::File, FieldType::Date]);
    }

    #[test]
    fn test_option_only_added_to_choice_fields() {
        let mut d = draft_with(&[FieldType::Text, FieldType::Dropdown]);
        assert!(!d.add_option(0, "ignored"));
        assert!(d.fields[0].options.is_empty());

        assert!(d.add_option(1, "  Red "));
        assert!(!d.add_option(1, "   "));
        assert_eq!(d.fields[1].options, vec!["Red"]);

        d.remove_option(1, 0);
        assert!(d.fields[1].options.is_empty());
    }

    #[test]
    fn test_label_editing() {
        let mut d = draft_with(&[FieldType::Text]);
        d.set_label(0, "Nam");
        d.push_label_char(0, 'e');
        assert_eq!(d.fields[0].label, "Name");
        d.pop_label_char(0);
        assert_eq!(d.fields[0].label, "Nam");
        // out of range is a no-op
        d.set_label(5, "x");
    }

    #[test]
    fn test_move_and_remove() {
        let mut d = draft_with(&[FieldType::Text, FieldType::Radio, FieldType::Date]);
        assert_eq!(d.move_field(0, 10), 2);
        assert_eq!(d.fields[2].field_type, FieldType::Text);
        let removed = d.remove_field(0).unwrap();
        assert_eq!(removed.field_type, FieldType::Radio);
        assert!(d.remove_field(9).is_none());
        assert_eq!(d.fields.len(), 2);
    }

    #[test]
    fn test_validate_requires_title_and_fields() {
        let mut d = FormDraft::new();
        assert_eq!(d.validate(), Err(MISSING_TITLE_OR_FIELDS));
        d.title = "Survey".into();
        assert_eq!(d.validate(), Err(MISSING_TITLE_OR_FIELDS));
        d.drop_field(FieldType::Text, 0);
        assert!(d.validate().is_ok());
        d.title = "   ".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_to_form_wraps_in_main_section() {
        let mut d = draft_with(&[FieldType::Radio]);
        d.title = "Poll".into();
        d.add_option(0, "Yes");
        let json = serde_json::to_value(d.to_form()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Poll",
                "sections": [{
                    "label": "Main Section",
                    "fields": [{"type": "radio", "label": "Radio Button", "options": ["Yes"]}]
                }]
            })
        );
    }

    #[test]
    fn test_from_form_flattens_sections() {
        let form = Form {
            id: Some("abc".into()),
            title: "Old".into(),
            sections: vec![
                Section { label: "Intro".into(), fields: vec![Field::new(FieldType::Text, "A")] },
                Section { label: "More".into(), fields: vec![Field::new(FieldType::Number, "B")] },
            ],
            created_at: None,
        };
        let d = FormDraft::from_form(&form);
        assert!(d.is_editing());
        assert_eq!(d.fields.len(), 2);
        assert_eq!(d.to_form().sections[0].label, "Intro");
    }
}
