//! The REST contract the wizard depends on.
//!
//! [`AuditBackend`] is the seam between the wizard and the network: the
//! production implementation is [`HttpBackend`](crate::http::HttpBackend),
//! tests supply an in-memory one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ecoaudit_core::audit::AuditDraft;
use ecoaudit_core::promise::ReductionPromise;
use ecoaudit_core::school::SchoolProfile;
use ecoaudit_core::types::{EntityId, Timestamp};
use ecoaudit_core::upload::UploadKind;

use crate::error::ApiError;

/// Request body for a pre-signed upload URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequest {
    pub kind: UploadKind,
    pub file_name: String,
    pub content_type: String,
    pub file_size: u64,
}

/// A pre-signed PUT target and the object path it writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    pub upload_url: String,
    pub object_path: String,
}

/// Metadata recorded against a school after a printable form upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintableFormSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub school_id: EntityId,
    pub object_path: String,
    pub file_name: String,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<Timestamp>,
}

/// Backend operations used by the audit wizard and upload flow.
#[async_trait]
pub trait AuditBackend: Send + Sync {
    /// `GET /api/schools/:id`
    async fn get_school(&self, school_id: &str) -> Result<SchoolProfile, ApiError>;

    /// `GET /api/audits/school/:schoolId`; `None` when the school has no
    /// audit yet.
    async fn find_audit_for_school(&self, school_id: &str)
        -> Result<Option<AuditDraft>, ApiError>;

    /// `POST /api/audits`; creates when `draft.id` is absent, updates
    /// otherwise. Returns the stored record.
    async fn save_audit(&self, draft: &AuditDraft) -> Result<AuditDraft, ApiError>;

    /// `POST /api/audits/:id/submit`
    async fn submit_audit(&self, audit_id: &str) -> Result<(), ApiError>;

    /// `GET /api/audits/:id/pdf`
    async fn download_results_pdf(&self, audit_id: &str) -> Result<Vec<u8>, ApiError>;

    /// `POST /api/reduction-promises`
    async fn create_promise(
        &self,
        promise: &ReductionPromise,
    ) -> Result<ReductionPromise, ApiError>;

    /// `GET /api/reduction-promises/audit/:auditId`
    async fn list_promises(&self, audit_id: &str) -> Result<Vec<ReductionPromise>, ApiError>;

    /// `POST /api/uploads/<kind>/signed-url`
    async fn request_upload_url(&self, request: &SignedUrlRequest)
        -> Result<SignedUpload, ApiError>;

    /// `PUT <upload_url>` with the raw file bytes.
    async fn put_object(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError>;

    /// `POST /api/printable-form-submissions`
    async fn record_form_submission(
        &self,
        submission: &PrintableFormSubmission,
    ) -> Result<PrintableFormSubmission, ApiError>;
}
