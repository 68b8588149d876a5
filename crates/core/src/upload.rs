//! Client-side checks for PDF uploads.
//!
//! Files are checked before a signed URL is requested, so a rejected file
//! never reaches storage.

use serde::{Deserialize, Serialize};

/// Only accepted content type.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Size limit for printable audit forms (10 MiB).
pub const MAX_PRINTABLE_FORM_BYTES: u64 = 10 * 1024 * 1024;

/// Size limit for admin pack files (20 MiB).
pub const MAX_ADMIN_PACK_BYTES: u64 = 20 * 1024 * 1024;

/// What is being uploaded, which decides the size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    PrintableForm,
    AdminPack,
}

impl UploadKind {
    pub fn max_bytes(self) -> u64 {
        match self {
            Self::PrintableForm => MAX_PRINTABLE_FORM_BYTES,
            Self::AdminPack => MAX_ADMIN_PACK_BYTES,
        }
    }
}

/// Why a file was refused before upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Only PDF files can be uploaded (got '{0}')")]
    NotPdf(String),

    #[error("The selected file is empty")]
    Empty,

    #[error("File is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// Validate a file's name, content type and size for `kind`.
pub fn validate_pdf_upload(
    file_name: &str,
    content_type: &str,
    size: u64,
    kind: UploadKind,
) -> Result<(), UploadRejection> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let has_pdf_extension = file_name.to_ascii_lowercase().ends_with(".pdf");
    if mime != PDF_MIME_TYPE || !has_pdf_extension {
        return Err(UploadRejection::NotPdf(content_type.to_string()));
    }
    if size == 0 {
        return Err(UploadRejection::Empty);
    }
    let limit = kind.max_bytes();
    if size > limit {
        return Err(UploadRejection::TooLarge { size, limit });
    }
    Ok(())
}
