use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAIN_SECTION_LABEL;

/// Field type tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    Checkbox,
    Radio,
    Dropdown,
    File,
}

impl FieldType {
    /// Palette order
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Text,
            FieldType::Checkbox,
            FieldType::Radio,
            FieldType::File,
            FieldType::Dropdown,
            FieldType::Date,
            FieldType::Textarea,
            FieldType::Number,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Dropdown => "dropdown",
            FieldType::File => "file",
        }
    }

    /// Label shown in the palette and given to freshly dropped fields
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text Field",
            FieldType::Textarea => "Paragraph Text",
            FieldType::Number => "Number",
            FieldType::Date => "Date Picker",
            FieldType::Checkbox => "Checkbox",
            FieldType::Radio => "Radio Button",
            FieldType::Dropdown => "Dropdown",
            FieldType::File => "File Upload",
        }
    }

    /// Whether `options` means anything for this type
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Checkbox | FieldType::Radio | FieldType::Dropdown)
    }
}

/// One input unit in a form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl Field {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Field {
            field_type,
            label: label.into(),
            options: Vec::new(),
            value: None,
        }
    }
}

/// Named group of fields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub label: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Section {
    pub fn main(fields: Vec<Field>) -> Self {
        Section {
            label: MAIN_SECTION_LABEL.to_string(),
            fields,
        }
    }
}

/// A form definition as stored by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Form {
    /// All fields across sections, in display order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }
}

/// Item of the form list
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FormSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl FormSummary {
    pub fn created_date(&self) -> String {
        self.created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// One answered field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub label: String,
    #[serde(default)]
    pub response: String,
}

/// One respondent's submitted answers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub responses: Vec<ResponseEntry>,
}

/// Body of `GET /api/forms/:id/responses`
#[derive(Clone, Debug, Deserialize)]
pub struct ResponsesEnvelope {
    #[serde(default)]
    pub responses: Vec<Submission>,
}

/// Body of `POST /forms/:id/share`
#[derive(Clone, Debug, Deserialize)]
pub struct ShareLink {
    #[serde(rename = "formLink")]
    pub form_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_tags_are_lowercase() {
        let json = serde_json::to_string(&FieldType::Textarea).unwrap();
        assert_eq!(json, "\"textarea\"");
        let parsed: FieldType = serde_json::from_str("\"dropdown\"").unwrap();
        assert_eq!(parsed, FieldType::Dropdown);
    }

    #[test]
    fn test_unknown_field_type_rejected() {
        assert!(serde_json::from_str::<FieldType>("\"slider\"").is_err());
    }

    #[test]
    fn test_form_from_backend_json() {
        let body = r#"{
            "_id": "66f1",
            "title": "Survey",
            "createdAt": "2024-09-23T10:00:00.000Z",
            "sections": [{"label": "Main Section", "fields": [
                {"type": "radio", "label": "Pick", "options": ["a", "b"]},
                {"type": "text", "label": "Name"}
            ]}]
        }"#;
        let form: Form = serde_json::from_str(body).unwrap();
        assert_eq!(form.id.as_deref(), Some("66f1"));
        assert_eq!(form.field_count(), 2);
        assert!(form.fields().nth(1).unwrap().options.is_empty());
        assert!(form.created_at.is_some());
    }

    #[test]
    fn test_new_form_omits_id() {
        let form = Form {
            id: None,
            title: "T".into(),
            sections: vec![Section::main(vec![Field::new(FieldType::Date, "When")])],
            created_at: None,
        };
        let value = serde_json::to_value(&form).unwrap();
        assert!(value.get("_id").is_none());
        assert_eq!(value["sections"][0]["label"], "Main Section");
        assert_eq!(value["sections"][0]["fields"][0]["type"], "date");
    }

    #[test]
    fn test_only_choice_types_have_options() {
        let with: Vec<_> = FieldType::all().iter().filter(|t| t.has_options()).collect();
        assert_eq!(with, vec![&FieldType::Checkbox, &FieldType::Radio, &FieldType::Dropdown]);
    }

    #[test]
    fn test_summary_date() {
        let s: FormSummary = serde_json::from_str(r#"{"_id":"1","title":"x"}"#).unwrap();
        assert_eq!(s.created_date(), "unknown");
    }
}
