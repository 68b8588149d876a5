//! REST client for the audit backend.
//!
//! Wraps the audit, reduction-promise and upload endpoints using
//! [`reqwest`]. Every request is logged at `debug`, every non-2xx
//! response is turned into [`ApiError::Status`] carrying the body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use ecoaudit_core::audit::AuditDraft;
use ecoaudit_core::promise::ReductionPromise;
use ecoaudit_core::school::SchoolProfile;
use ecoaudit_core::upload::UploadKind;

use crate::backend::{AuditBackend, PrintableFormSubmission, SignedUpload, SignedUrlRequest};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP client for one audit backend.
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
}

impl HttpBackend {
    /// Create a client for `api_url`, e.g. `http://host:5000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with the configured base URL and timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Path segment of the signed-URL endpoint for each upload kind.
fn upload_segment(kind: UploadKind) -> &'static str {
    match kind {
        UploadKind::PrintableForm => "printable-forms",
        UploadKind::AdminPack => "admin-packs",
    }
}

#[async_trait]
impl AuditBackend for HttpBackend {
    async fn get_school(&self, school_id: &str) -> Result<SchoolProfile, ApiError> {
        tracing::debug!(school_id, "Fetching school profile");
        let response = self
            .client
            .get(self.url(&format!("/api/schools/{school_id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn find_audit_for_school(
        &self,
        school_id: &str,
    ) -> Result<Option<AuditDraft>, ApiError> {
        tracing::debug!(school_id, "Fetching existing audit");
        let response = self
            .client
            .get(self.url(&format!("/api/audits/school/{school_id}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str::<Option<AuditDraft>>(&body)?)
    }

    async fn save_audit(&self, draft: &AuditDraft) -> Result<AuditDraft, ApiError> {
        tracing::debug!(
            audit_id = draft.id.as_deref(),
            school_id = %draft.school_id,
            current_part = draft.current_part,
            "Saving audit draft"
        );
        let response = self
            .client
            .post(self.url("/api/audits"))
            .json(draft)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn submit_audit(&self, audit_id: &str) -> Result<(), ApiError> {
        tracing::debug!(audit_id, "Submitting audit");
        let response = self
            .client
            .post(self.url(&format!("/api/audits/{audit_id}/submit")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn download_results_pdf(&self, audit_id: &str) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(audit_id, "Downloading results PDF");
        let response = self
            .client
            .get(self.url(&format!("/api/audits/{audit_id}/pdf")))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn create_promise(
        &self,
        promise: &ReductionPromise,
    ) -> Result<ReductionPromise, ApiError> {
        tracing::debug!(
            audit_id = %promise.audit_id,
            item = %promise.plastic_item_type,
            "Creating reduction promise"
        );
        let response = self
            .client
            .post(self.url("/api/reduction-promises"))
            .json(promise)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_promises(&self, audit_id: &str) -> Result<Vec<ReductionPromise>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/reduction-promises/audit/{audit_id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn request_upload_url(
        &self,
        request: &SignedUrlRequest,
    ) -> Result<SignedUpload, ApiError> {
        tracing::debug!(
            file_name = %request.file_name,
            file_size = request.file_size,
            "Requesting signed upload URL"
        );
        let response = self
            .client
            .post(self.url(&format!(
                "/api/uploads/{}/signed-url",
                upload_segment(request.kind)
            )))
            .json(request)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn put_object(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .put(upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn record_form_submission(
        &self,
        submission: &PrintableFormSubmission,
    ) -> Result<PrintableFormSubmission, ApiError> {
        let response = self
            .client
            .post(self.url("/api/printable-form-submissions"))
            .json(submission)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
