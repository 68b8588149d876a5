//! Audit review status and its transition rules.
//!
//! An audit is edited while `draft`, moves to `submitted` on final submit,
//! and an admin outside this system moves it to `approved` or `rejected`.
//! A rejected audit can be edited and resubmitted; approved is terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Review status of an audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    Draft,
    /// Awaiting admin review. Older records call this `pending`.
    #[serde(alias = "pending")]
    Submitted,
    Approved,
    Rejected,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the wizard may modify an audit in this status.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Validate a status change.
    ///
    /// | from      | allowed to                      |
    /// |-----------|---------------------------------|
    /// | draft     | draft, submitted                |
    /// | rejected  | draft, submitted                |
    /// | submitted | approved, rejected              |
    /// | approved  | (none)                          |
    pub fn validate_transition(from: Self, to: Self) -> Result<(), CoreError> {
        let allowed = match from {
            Self::Draft | Self::Rejected => matches!(to, Self::Draft | Self::Submitted),
            Self::Submitted => matches!(to, Self::Approved | Self::Rejected),
            Self::Approved => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Cannot move audit from '{}' to '{}'",
                from.as_str(),
                to.as_str()
            )))
        }
    }
}
