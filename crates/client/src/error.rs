use ecoaudit_core::error::CoreError;
use ecoaudit_core::promise::ReductionPromise;
use ecoaudit_core::types::EntityId;
use ecoaudit_core::validation::FieldErrors;
use ecoaudit_core::wizard::{StepFailure, WizardStep};

/// Errors from the audit REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Audit API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A promise whose create call failed during the fan-out.
#[derive(Debug)]
pub struct PromiseFailure {
    pub plastic_item_type: String,
    pub plastic_item_label: String,
    pub error: ApiError,
}

/// Errors surfaced by [`WizardController`](crate::wizard::WizardController).
///
/// Validation variants never involve the network. Every variant leaves the
/// in-memory form untouched so the user can fix or retry.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The active step failed validation; nothing was sent.
    #[error("{} is incomplete: {errors}", .step.label())]
    Validation {
        step: WizardStep,
        errors: FieldErrors,
    },

    /// Final submission found invalid steps; nothing was sent.
    #[error("Audit cannot be submitted: {} step(s) are incomplete", .0.len())]
    Incomplete(Vec<StepFailure>),

    /// A domain rule refused the operation (e.g. editing an approved audit).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A backend call failed.
    #[error("Backend request failed: {0}")]
    Backend(#[from] ApiError),

    /// The operation needs an audit the backend knows about.
    #[error("Audit has not been saved yet")]
    NotSaved,

    /// The audit was submitted but some promises could not be created.
    #[error(
        "Audit {audit_id} was submitted, but {} of {} reduction promises could not be saved",
        .failed.len(),
        .failed.len() + .created.len()
    )]
    PromisesPartiallyFailed {
        audit_id: EntityId,
        created: Vec<ReductionPromise>,
        failed: Vec<PromiseFailure>,
    },

    /// The audit was submitted but none of its promises could be created.
    #[error("Audit {audit_id} was submitted, but none of its reduction promises could be saved")]
    PromisesFailed {
        audit_id: EntityId,
        failed: Vec<PromiseFailure>,
    },
}
