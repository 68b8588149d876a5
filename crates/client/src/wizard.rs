//! Wizard controller: drives [`WizardState`] against an [`AuditBackend`].
//!
//! All validation happens locally before any request is made. A failed
//! request leaves the in-memory state exactly as it was, so the caller can
//! retry without losing input.

use futures::future::join_all;

use ecoaudit_core::audit::AuditForm;
use ecoaudit_core::promise::{PromisePolicy, ReductionPromise};
use ecoaudit_core::types::EntityId;
use ecoaudit_core::wizard::{LoadState, WizardState, WizardStep};

use crate::backend::AuditBackend;
use crate::error::{PromiseFailure, WizardError};

/// What [`WizardController::load_existing`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The wizard was already populated; nothing was fetched.
    AlreadyLoaded,
    /// A stored audit was restored at `step`.
    Resumed { step: WizardStep },
    /// No audit existed; step 1 was pre-filled from the school profile.
    Prefilled,
}

/// Result of a successful final submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub audit_id: EntityId,
    /// Promises created by this call.
    pub promises: Vec<ReductionPromise>,
}

pub struct WizardController<B> {
    backend: B,
    state: WizardState,
}

impl<B: AuditBackend> WizardController<B> {
    pub fn new(backend: B, school_id: impl Into<EntityId>, policy: PromisePolicy) -> Self {
        Self {
            backend,
            state: WizardState::new(school_id, policy),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut AuditForm {
        self.state.form_mut()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ---- loading ----

    /// Populate the wizard from the backend, at most once.
    ///
    /// Restores a stored audit (with its promises) when the school has
    /// one, otherwise pre-fills step 1 from the school profile.
    pub async fn load_existing(&mut self) -> Result<LoadOutcome, WizardError> {
        if self.state.load_state() == LoadState::Loaded {
            return Ok(LoadOutcome::AlreadyLoaded);
        }
        let school_id = self.state.school_id().to_string();

        match self.backend.find_audit_for_school(&school_id).await? {
            Some(record) => {
                let promises = match record.id.as_deref() {
                    Some(audit_id) => self.backend.list_promises(audit_id).await?,
                    None => Vec::new(),
                };
                self.state.restore(record, &promises);
                let step = self.state.current_step();
                tracing::info!(
                    school_id = %school_id,
                    audit_id = self.state.audit_id(),
                    step = step.to_number(),
                    "Resumed audit"
                );
                Ok(LoadOutcome::Resumed { step })
            }
            None => {
                let profile = self.backend.get_school(&school_id).await?;
                self.state.prefill(&profile);
                tracing::info!(school_id = %school_id, "Started new audit from school profile");
                Ok(LoadOutcome::Prefilled)
            }
        }
    }

    // ---- validation ----

    pub fn validate_step(&self, step: WizardStep) -> Result<(), WizardError> {
        self.state
            .validate_step(step)
            .map_err(|errors| WizardError::Validation { step, errors })
    }

    // ---- persistence ----

    /// Validate the active step and save the whole form as a draft.
    /// Returns the audit id.
    pub async fn save_progress(&mut self) -> Result<EntityId, WizardError> {
        let part = self.state.current_step();
        self.persist(part).await
    }

    /// Save, then move to the next step. On the last step this only saves.
    pub async fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let current = self.state.current_step();
        let part = current.next().unwrap_or(current);
        self.persist(part).await?;
        self.state.next_step();
        Ok(self.state.current_step())
    }

    /// Step back without validating or saving.
    pub fn retreat(&mut self) -> WizardStep {
        self.state.previous_step();
        self.state.current_step()
    }

    async fn persist(&mut self, part: WizardStep) -> Result<EntityId, WizardError> {
        self.state.ensure_editable()?;
        self.validate_step(self.state.current_step())?;

        let payload = self.state.draft_payload(part)?;
        let saved = self.backend.save_audit(&payload).await.map_err(|e| {
            tracing::error!(
                school_id = %self.state.school_id(),
                error = %e,
                "Failed to save audit draft"
            );
            WizardError::Backend(e)
        })?;
        self.state.adopt_saved(&saved);

        let audit_id = self
            .state
            .audit_id()
            .map(str::to_string)
            .ok_or(WizardError::NotSaved)?;
        tracing::info!(
            audit_id = %audit_id,
            current_part = part.to_number(),
            total_plastic_items = payload.total_plastic_items,
            "Saved audit draft"
        );
        Ok(audit_id)
    }

    // ---- submission ----

    /// Validate every step, save, submit and create the reduction promises.
    ///
    /// Nothing is sent if any step is invalid. Once the submit call
    /// succeeds the audit stays submitted even if promise creation fails;
    /// use [`retry_promises`](Self::retry_promises) for the remainder.
    pub async fn submit_final(&mut self) -> Result<SubmitOutcome, WizardError> {
        self.state.ensure_editable()?;
        self.state.validate_all().map_err(WizardError::Incomplete)?;

        let audit_id = self.persist(self.state.current_step()).await?;

        self.backend.submit_audit(&audit_id).await.map_err(|e| {
            tracing::error!(audit_id = %audit_id, error = %e, "Failed to submit audit");
            WizardError::Backend(e)
        })?;
        self.state.mark_submitted()?;
        tracing::info!(audit_id = %audit_id, "Audit submitted");

        let promises = self.create_pending_promises(&audit_id).await?;
        Ok(SubmitOutcome { audit_id, promises })
    }

    /// Create the promises a previous submission failed to store.
    pub async fn retry_promises(&mut self) -> Result<SubmitOutcome, WizardError> {
        let audit_id = self
            .state
            .audit_id()
            .map(str::to_string)
            .ok_or(WizardError::NotSaved)?;
        let promises = self.create_pending_promises(&audit_id).await?;
        Ok(SubmitOutcome { audit_id, promises })
    }

    /// Create every promise without a backend id, concurrently.
    async fn create_pending_promises(
        &mut self,
        audit_id: &str,
    ) -> Result<Vec<ReductionPromise>, WizardError> {
        let rows = self
            .state
            .pending_promise_rows(audit_id)
            .map_err(|errors| WizardError::Validation {
                step: WizardStep::ReductionPromises,
                errors,
            })?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let backend = &self.backend;
        let results = join_all(rows.iter().map(|row| backend.create_promise(row))).await;

        let mut created = Vec::new();
        let mut failed = Vec::new();
        for (row, result) in rows.into_iter().zip(results) {
            match result {
                Ok(stored) => created.push(stored),
                Err(error) => {
                    tracing::warn!(
                        audit_id,
                        item = %row.plastic_item_type,
                        error = %error,
                        "Failed to create reduction promise"
                    );
                    failed.push(PromiseFailure {
                        plastic_item_type: row.plastic_item_type,
                        plastic_item_label: row.plastic_item_label,
                        error,
                    });
                }
            }
        }
        for promise in &created {
            self.state.record_created_promise(promise);
        }

        tracing::info!(
            audit_id,
            created = created.len(),
            failed = failed.len(),
            "Reduction promises processed"
        );

        match (created.is_empty(), failed.is_empty()) {
            (_, true) => Ok(created),
            (true, false) => Err(WizardError::PromisesFailed {
                audit_id: audit_id.to_string(),
                failed,
            }),
            (false, false) => Err(WizardError::PromisesPartiallyFailed {
                audit_id: audit_id.to_string(),
                created,
                failed,
            }),
        }
    }

    // ---- results ----

    /// Download the results PDF for the saved audit.
    pub async fn download_results_pdf(&self) -> Result<Vec<u8>, WizardError> {
        let audit_id = self.state.audit_id().ok_or(WizardError::NotSaved)?;
        Ok(self.backend.download_results_pdf(audit_id).await?)
    }
}
