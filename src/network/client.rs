//! HTTP client for the forms backend

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{Form, FormSummary, ResponseEntry, ResponsesEnvelope, ShareLink, Submission};

/// Body returned by `POST /forms`
#[derive(Deserialize)]
struct Created {
    #[serde(rename = "_id")]
    id: String,
}

/// Thin wrapper over `reqwest::Client` bound to a backend base URL
#[derive(Clone, Debug)]
pub struct FormsClient {
    http: reqwest::Client,
    base_url: String,
}

impl FormsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        FormsClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn forms_url(&self) -> String {
        format!("{}/forms", self.base_url)
    }

    pub fn form_url(&self, form_id: &str) -> String {
        format!("{}/forms/{}", self.base_url, form_id)
    }

    pub fn share_url(&self, form_id: &str) -> String {
        format!("{}/forms/{}/share", self.base_url, form_id)
    }

    pub fn submit_url(&self, form_id: &str) -> String {
        format!("{}/api/forms/{}/submit", self.base_url, form_id)
    }

    pub fn responses_url(&self, form_id: &str) -> String {
        format!("{}/api/forms/{}/responses", self.base_url, form_id)
    }

    pub async fn list_forms(&self) -> ApiResult<Vec<FormSummary>> {
        let resp = self.http.get(self.forms_url()).send().await?;
        read_json(resp).await
    }

    pub async fn get_form(&self, form_id: &str) -> ApiResult<Form> {
        let resp = self.http.get(self.form_url(form_id)).send().await?;
        read_json(resp).await
    }

    /// Create a form; the backend must answer 201 with the new `_id`
    pub async fn create_form(&self, form: &Form) -> ApiResult<String> {
        let resp = self.http.post(self.forms_url()).json(form).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::CREATED {
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        let created: Created = serde_json::from_str(&body)?;
        Ok(created.id)
    }

    pub async fn update_form(&self, form_id: &str, form: &Form) -> ApiResult<()> {
        let resp = self.http.put(self.form_url(form_id)).json(form).send().await?;
        check_status(resp).await.map(|_| ())
    }

    pub async fn share_form(&self, form_id: &str) -> ApiResult<String> {
        let resp = self.http.post(self.share_url(form_id)).send().await?;
        let link: ShareLink = read_json(resp).await?;
        Ok(link.form_link)
    }

    /// Multipart submission: a `responses` JSON part plus one part per file
    pub async fn submit(
        &self,
        form_id: &str,
        entries: &[ResponseEntry],
        files: &[(String, PathBuf)],
    ) -> ApiResult<()> {
        let mut body = multipart::Form::new().text("responses", serde_json::to_string(entries)?);
        for (label, path) in files {
            body = body.part(label.clone(), file_part(path).await?);
        }
        let resp = self.http.post(self.submit_url(form_id)).multipart(body).send().await?;
        check_status(resp).await.map(|_| ())
    }

    pub async fn list_responses(&self, form_id: &str) -> ApiResult<Vec<Submission>> {
        let resp = self.http.get(self.responses_url(form_id)).send().await?;
        let envelope: ResponsesEnvelope = read_json(resp).await?;
        Ok(envelope.responses)
    }
}

async fn file_part(path: &Path) -> ApiResult<multipart::Part> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
        path: path.display().to_string(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(multipart::Part::bytes(bytes).file_name(name))
}

async fn check_status(resp: reqwest::Response) -> ApiResult<String> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16(), body });
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
    let body = check_status(resp).await?;
    Ok(serde_json::from_str(&body)?)
}
