//! Reduction promises.
//!
//! After an audit, a school commits to cutting specific items it measured.
//! Candidates are listed per room (bottles in the lunchroom and bottles in
//! the office are separate choices), the baseline is pre-filled from that
//! room's annualized count, and the target may not exceed the baseline.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::audit::AuditForm;
use crate::metrics::annualize;
use crate::types::EntityId;
use crate::validation::{not_blank, FieldErrors};

/// Default minimum number of promises once any are made.
pub const DEFAULT_MIN_PROMISES: usize = 2;

/// Item type used for a room's pooled "other" count.
const OTHER_ITEM_KEY: &str = "other";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Period over which a reduction is promised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeframeUnit {
    Week,
    Month,
    Year,
}

/// Business rules for a set of promises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromisePolicy {
    /// Minimum number of promises when at least one is made.
    pub min_promises: usize,
}

impl Default for PromisePolicy {
    fn default() -> Self {
        Self {
            min_promises: DEFAULT_MIN_PROMISES,
        }
    }
}

/// A selectable item for a new promise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromiseCandidate {
    pub plastic_item_type: String,
    pub plastic_item_label: String,
    pub baseline_quantity: u64,
}

/// A promise as edited in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromiseDraft {
    /// Set once the backend has stored this promise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[validate(custom(function = "not_blank"))]
    pub plastic_item_type: String,

    #[validate(custom(function = "not_blank"))]
    pub plastic_item_label: String,

    pub baseline_quantity: u64,

    pub target_quantity: u64,

    #[validate(required(message = "Please choose a timeframe"))]
    pub timeframe_unit: Option<TimeframeUnit>,
}

/// A promise row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReductionPromise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub audit_id: EntityId,
    pub plastic_item_type: String,
    pub plastic_item_label: String,
    pub baseline_quantity: u64,
    pub target_quantity: u64,
    pub timeframe_unit: TimeframeUnit,
    pub reduction_amount: u64,
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// Every (room, item) pair with a positive count, in form order.
///
/// "Other" counts are offered too, labelled with the auditor's
/// description when one was given.
pub fn promise_candidates(form: &AuditForm) -> Vec<PromiseCandidate> {
    let mut candidates = Vec::new();
    for (room, section) in form.rooms() {
        for item in room.items() {
            let daily = section.count(*item);
            if daily > 0 {
                candidates.push(PromiseCandidate {
                    plastic_item_type: format!("{}.{}", room.key(), item.key()),
                    plastic_item_label: format!("{} ({})", item.label(), room.label()),
                    baseline_quantity: annualize(daily),
                });
            }
        }
        let other = section.other_count();
        if other > 0 {
            let description = section
                .other_description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("Other Plastic Items");
            candidates.push(PromiseCandidate {
                plastic_item_type: format!("{}.{}", room.key(), OTHER_ITEM_KEY),
                plastic_item_label: format!("{} ({})", description, room.label()),
                baseline_quantity: annualize(other),
            });
        }
    }
    candidates
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

impl PromiseDraft {
    /// Start a promise for `candidate` with the target at the baseline.
    pub fn from_candidate(candidate: &PromiseCandidate) -> Self {
        Self {
            id: None,
            plastic_item_type: candidate.plastic_item_type.clone(),
            plastic_item_label: candidate.plastic_item_label.clone(),
            baseline_quantity: candidate.baseline_quantity,
            target_quantity: candidate.baseline_quantity,
            timeframe_unit: None,
        }
    }

    /// `baseline - target`, zero if the target exceeds the baseline.
    pub fn reduction_amount(&self) -> u64 {
        self.baseline_quantity.saturating_sub(self.target_quantity)
    }

    /// Field validation plus the target-within-baseline rule.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        if self.target_quantity > self.baseline_quantity {
            errors.add(
                "targetQuantity",
                format!(
                    "Target cannot exceed the current amount of {}",
                    self.baseline_quantity
                ),
            );
        }
        errors.into_result()
    }

    /// Build the row to persist for `audit_id`.
    pub fn to_promise(&self, audit_id: &str) -> Result<ReductionPromise, FieldErrors> {
        self.check()?;
        let timeframe_unit = self.timeframe_unit.ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.add("timeframeUnit", "Please choose a timeframe");
            errors
        })?;
        Ok(ReductionPromise {
            id: self.id.clone(),
            audit_id: audit_id.to_string(),
            plastic_item_type: self.plastic_item_type.clone(),
            plastic_item_label: self.plastic_item_label.clone(),
            baseline_quantity: self.baseline_quantity,
            target_quantity: self.target_quantity,
            timeframe_unit,
            reduction_amount: self.reduction_amount(),
        })
    }
}

impl From<&ReductionPromise> for PromiseDraft {
    fn from(promise: &ReductionPromise) -> Self {
        Self {
            id: promise.id.clone(),
            plastic_item_type: promise.plastic_item_type.clone(),
            plastic_item_label: promise.plastic_item_label.clone(),
            baseline_quantity: promise.baseline_quantity,
            target_quantity: promise.target_quantity,
            timeframe_unit: Some(promise.timeframe_unit),
        }
    }
}

/// Validate a whole set of promises.
///
/// An empty set is valid. Otherwise the set must meet the policy minimum,
/// may not promise the same item twice, and every promise must pass
/// [`PromiseDraft::check`]. Per-promise errors are keyed `promises.<i>.*`.
pub fn validate_promise_set(drafts: &[PromiseDraft], policy: &PromisePolicy) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if drafts.is_empty() {
        return Ok(());
    }
    if drafts.len() < policy.min_promises {
        errors.add(
            "promises",
            format!(
                "Please make at least {} promises, or remove them all",
                policy.min_promises
            ),
        );
    }

    let mut seen = HashSet::new();
    for (index, draft) in drafts.iter().enumerate() {
        if !seen.insert(draft.plastic_item_type.as_str()) {
            errors.add(
                format!("promises.{index}.plasticItemType"),
                "This item already has a promise",
            );
        }
        if let Err(e) = draft.check() {
            errors.merge_prefixed(&format!("promises.{index}"), e);
        }
    }
    errors.into_result()
}
