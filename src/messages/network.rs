//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use crate::models::{Form, FormSummary, ResponseEntry, Submission};

/// Why a form is being fetched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPurpose {
    Fill,
    Edit,
}

/// Backend operation, used to pick the failure message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    ListForms,
    FetchForm,
    CreateForm,
    UpdateForm,
    Submit,
    FetchResponses,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::ListForms => "Failed to fetch forms. Please try again later.",
            Operation::FetchForm => "Failed to load form. Please try again.",
            Operation::CreateForm => "Failed to create form. Please try again.",
            Operation::UpdateForm => "Failed to update form.",
            Operation::Submit => "Failed to submit form. Please try again.",
            Operation::FetchResponses => "Failed to load responses. Please try again.",
        }
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// `GET /forms`
    ListForms { id: u64 },
    /// `GET /forms/:id`
    FetchForm {
        id: u64,
        form_id: String,
        purpose: FormPurpose,
    },
    /// Create (no `form_id`) or update, then request a share link
    SaveForm {
        id: u64,
        form: Form,
        form_id: Option<String>,
    },
    /// Multipart `POST /api/forms/:id/submit`
    SubmitResponses {
        id: u64,
        form_id: String,
        entries: Vec<ResponseEntry>,
        files: Vec<(String, PathBuf)>,
    },
    /// `GET /api/forms/:id/responses`
    FetchResponses { id: u64, form_id: String },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    FormsListed {
        id: u64,
        forms: Vec<FormSummary>,
    },
    FormLoaded {
        id: u64,
        form: Form,
        purpose: FormPurpose,
    },
    /// `share_link` is `None` when the form was stored but sharing failed
    FormSaved {
        id: u64,
        form_id: String,
        share_link: Option<String>,
    },
    Submitted {
        id: u64,
    },
    ResponsesLoaded {
        id: u64,
        form_id: String,
        submissions: Vec<Submission>,
    },
    Failed {
        id: u64,
        operation: Operation,
        detail: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::FormsListed { id, .. } => *id,
            NetworkResponse::FormLoaded { id, .. } => *id,
            NetworkResponse::FormSaved { id, .. } => *id,
            NetworkResponse::Submitted { id } => *id,
            NetworkResponse::ResponsesLoaded { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
