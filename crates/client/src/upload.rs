//! PDF upload flow: check locally, request a signed URL, PUT the bytes,
//! then record the submission.

use chrono::Utc;

use ecoaudit_core::upload::{validate_pdf_upload, UploadKind, UploadRejection};

use crate::backend::{AuditBackend, PrintableFormSubmission, SignedUpload, SignedUrlRequest};
use crate::error::ApiError;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Errors from the upload flow, one variant per stage.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Rejected(#[from] UploadRejection),

    #[error("Could not obtain an upload URL: {0}")]
    SignedUrl(#[source] ApiError),

    #[error("Upload to storage failed: {0}")]
    Storage(#[source] ApiError),

    #[error("File was uploaded but could not be recorded: {0}")]
    Record(#[source] ApiError),
}

/// Check `file` and upload it to storage. Returns the signed target,
/// whose `object_path` identifies the stored file.
pub async fn upload_pdf<B: AuditBackend + ?Sized>(
    backend: &B,
    kind: UploadKind,
    file: UploadFile,
) -> Result<SignedUpload, UploadError> {
    let size = file.size();
    validate_pdf_upload(&file.file_name, &file.content_type, size, kind)?;

    let request = SignedUrlRequest {
        kind,
        file_name: file.file_name.clone(),
        content_type: file.content_type.clone(),
        file_size: size,
    };
    let signed = backend
        .request_upload_url(&request)
        .await
        .map_err(UploadError::SignedUrl)?;

    backend
        .put_object(&signed.upload_url, &file.content_type, file.bytes)
        .await
        .map_err(UploadError::Storage)?;

    tracing::info!(
        file_name = %file.file_name,
        size,
        object_path = %signed.object_path,
        "Uploaded PDF"
    );
    Ok(signed)
}

/// Upload a completed printable audit form and record it against the
/// school.
pub async fn upload_printable_form<B: AuditBackend + ?Sized>(
    backend: &B,
    school_id: &str,
    file: UploadFile,
) -> Result<PrintableFormSubmission, UploadError> {
    let file_name = file.file_name.clone();
    let file_size = file.size();
    let signed = upload_pdf(backend, UploadKind::PrintableForm, file).await?;

    let submission = PrintableFormSubmission {
        id: None,
        school_id: school_id.to_string(),
        object_path: signed.object_path,
        file_name,
        file_size,
        uploaded_at: Some(Utc::now()),
    };
    backend
        .record_form_submission(&submission)
        .await
        .map_err(|e| {
            tracing::error!(
                school_id,
                object_path = %submission.object_path,
                error = %e,
                "Failed to record printable form submission"
            );
            UploadError::Record(e)
        })
}
