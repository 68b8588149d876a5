//! Audit wizard steps, per-step validation and the wizard state machine.
//!
//! [`WizardState`] holds everything the wizard knows between backend
//! calls. It performs no I/O: the client crate's controller feeds it
//! backend responses and asks it for payloads.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::audit::{AuditDraft, AuditForm, Part2Data, Part3Data, RoomSection};
use crate::catalog::RoomKind;
use crate::error::CoreError;
use crate::promise::{
    promise_candidates, validate_promise_set, PromiseCandidate, PromiseDraft, PromisePolicy,
    ReductionPromise,
};
use crate::school::SchoolProfile;
use crate::selection::restore_part3;
use crate::status::AuditStatus;
use crate::types::EntityId;
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

/// The six steps of the audit wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SchoolInfo,
    LunchroomPlayground,
    Rooms,
    WasteManagement,
    Results,
    ReductionPromises,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 6;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 6;

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        Self::SchoolInfo,
        Self::LunchroomPlayground,
        Self::Rooms,
        Self::WasteManagement,
        Self::Results,
        Self::ReductionPromises,
    ];

    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::SchoolInfo),
            2 => Ok(Self::LunchroomPlayground),
            3 => Ok(Self::Rooms),
            4 => Ok(Self::WasteManagement),
            5 => Ok(Self::Results),
            6 => Ok(Self::ReductionPromises),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::SchoolInfo => 1,
            Self::LunchroomPlayground => 2,
            Self::Rooms => 3,
            Self::WasteManagement => 4,
            Self::Results => 5,
            Self::ReductionPromises => 6,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::SchoolInfo => "School Information",
            Self::LunchroomPlayground => "Lunchroom & Playground",
            Self::Rooms => "Other Rooms",
            Self::WasteManagement => "Waste Management",
            Self::Results => "Results",
            Self::ReductionPromises => "Reduction Promises",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        self.to_number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    pub fn is_last(self) -> bool {
        self.to_number() == MAX_STEP
    }
}

// ---------------------------------------------------------------------------
// Step validation
// ---------------------------------------------------------------------------

/// A step that failed validation, with its field errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: WizardStep,
    pub errors: FieldErrors,
}

/// Validate one step of `form`.
///
/// The results step is display-only and always passes. The rooms step
/// requires at least one selected room.
pub fn validate_step(
    form: &AuditForm,
    step: WizardStep,
    policy: &PromisePolicy,
) -> Result<(), FieldErrors> {
    match step {
        WizardStep::SchoolInfo => form.part1.validate().map_err(FieldErrors::from),
        WizardStep::LunchroomPlayground => check_part2(&form.part2),
        WizardStep::Rooms => check_part3(&form.part3),
        WizardStep::WasteManagement => form.part4.validate().map_err(FieldErrors::from),
        WizardStep::Results => Ok(()),
        WizardStep::ReductionPromises => validate_promise_set(&form.promises, policy),
    }
}

/// Validate every step, collecting each failure.
pub fn validate_all(form: &AuditForm, policy: &PromisePolicy) -> Result<(), Vec<StepFailure>> {
    let failures: Vec<StepFailure> = WizardStep::ALL
        .iter()
        .filter_map(|step| {
            validate_step(form, *step, policy)
                .err()
                .map(|errors| StepFailure {
                    step: *step,
                    errors,
                })
        })
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

fn check_part2(part2: &Part2Data) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for (room, section) in part2.rooms() {
        check_room(room, section, &mut errors);
    }
    errors.into_result()
}

fn check_part3(part3: &Part3Data) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if !part3.any_selected() {
        errors.add("rooms", "Please select at least one room");
    }
    for (room, section) in part3.rooms() {
        if section.is_selected() {
            check_room(room, section, &mut errors);
        }
    }
    errors.into_result()
}

/// A positive "other" count must say what the items were.
fn check_room(room: RoomKind, section: &RoomSection, errors: &mut FieldErrors) {
    let described = section
        .other_description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());
    if section.other_count() > 0 && !described {
        errors.add(
            format!("{}.otherDescription", room.key()),
            "Please describe the other plastic items",
        );
    }
}

// ---------------------------------------------------------------------------
// Wizard state
// ---------------------------------------------------------------------------

/// Whether the wizard has been populated from the backend yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
}

/// In-memory wizard state for one school's audit.
#[derive(Debug, Clone)]
pub struct WizardState {
    school_id: EntityId,
    current_step: WizardStep,
    audit_id: Option<EntityId>,
    status: AuditStatus,
    review_notes: Option<String>,
    load_state: LoadState,
    policy: PromisePolicy,
    form: AuditForm,
    /// Item types the backend accepted in this session, id or not.
    created_promises: HashSet<String>,
}

impl WizardState {
    pub fn new(school_id: impl Into<EntityId>, policy: PromisePolicy) -> Self {
        Self {
            school_id: school_id.into(),
            current_step: WizardStep::SchoolInfo,
            audit_id: None,
            status: AuditStatus::Draft,
            review_notes: None,
            load_state: LoadState::NotLoaded,
            policy,
            form: AuditForm::default(),
            created_promises: HashSet::new(),
        }
    }

    pub fn school_id(&self) -> &str {
        &self.school_id
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn audit_id(&self) -> Option<&str> {
        self.audit_id.as_deref()
    }

    pub fn status(&self) -> AuditStatus {
        self.status
    }

    pub fn review_notes(&self) -> Option<&str> {
        self.review_notes.as_deref()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn policy(&self) -> &PromisePolicy {
        &self.policy
    }

    pub fn form(&self) -> &AuditForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AuditForm {
        &mut self.form
    }

    // ---- loading ----

    /// Populate from a stored audit and its promises.
    ///
    /// Ignored once the state is loaded, so a re-fetch cannot overwrite
    /// edits in progress. Returns whether the record was applied.
    pub fn restore(&mut self, record: AuditDraft, promises: &[ReductionPromise]) -> bool {
        if self.load_state == LoadState::Loaded {
            return false;
        }

        self.current_step =
            WizardStep::from_number(record.current_part).unwrap_or(WizardStep::SchoolInfo);
        self.audit_id = record.id;
        self.status = record.status;
        self.review_notes = record.review_notes;

        let mut part2 = record.part2_data;
        for (room, section) in part2.rooms_mut() {
            section.fill_defaults(room);
        }
        let mut part3 = record.part3_data;
        restore_part3(&mut part3);

        self.form = AuditForm {
            part1: record.part1_data,
            part2,
            part3,
            part4: record.part4_data,
            promises: promises.iter().map(PromiseDraft::from).collect(),
        };
        self.load_state = LoadState::Loaded;
        true
    }

    /// Populate step 1 from the school profile when no audit exists yet.
    /// Ignored once loaded.
    pub fn prefill(&mut self, profile: &SchoolProfile) -> bool {
        if self.load_state == LoadState::Loaded {
            return false;
        }
        self.form.part1 = profile.prefill_part1();
        self.load_state = LoadState::Loaded;
        true
    }

    // ---- validation ----

    pub fn validate_step(&self, step: WizardStep) -> Result<(), FieldErrors> {
        validate_step(&self.form, step, &self.policy)
    }

    pub fn validate_all(&self) -> Result<(), Vec<StepFailure>> {
        validate_all(&self.form, &self.policy)
    }

    /// Fail unless the audit may still be edited.
    pub fn ensure_editable(&self) -> Result<(), CoreError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Audit is '{}' and can no longer be edited",
                self.status.as_str()
            )))
        }
    }

    // ---- persistence ----

    /// Assemble the draft payload: every section, freshly derived
    /// metrics, status `draft`, and `current_part` set to `part`.
    pub fn draft_payload(&self, part: WizardStep) -> Result<AuditDraft, CoreError> {
        AuditStatus::validate_transition(self.status, AuditStatus::Draft)?;
        let metrics = self.form.metrics();
        Ok(AuditDraft {
            id: self.audit_id.clone(),
            school_id: self.school_id.clone(),
            current_part: part.to_number(),
            status: AuditStatus::Draft,
            part1_data: self.form.part1.clone(),
            part2_data: self.form.part2.clone(),
            part3_data: self.form.part3.clone(),
            part4_data: self.form.part4.clone(),
            total_plastic_items: metrics.total_plastic_items,
            top_problem_plastics: metrics.top_problem_plastics.clone(),
            results_data: Some(metrics),
            review_notes: None,
            created_at: None,
            updated_at: None,
            submitted_at: None,
        })
    }

    /// Record the backend's response to a save. Adopts the id on first
    /// save; an id already known is kept.
    pub fn adopt_saved(&mut self, record: &AuditDraft) {
        if self.audit_id.is_none() {
            self.audit_id = record.id.clone();
        }
        self.status = record.status;
        self.review_notes = record.review_notes.clone();
    }

    /// Move to `submitted` after the backend accepted the submission.
    pub fn mark_submitted(&mut self) -> Result<(), CoreError> {
        AuditStatus::validate_transition(self.status, AuditStatus::Submitted)?;
        self.status = AuditStatus::Submitted;
        Ok(())
    }

    // ---- navigation ----

    /// Step forward. Returns `false` on the last step.
    pub fn next_step(&mut self) -> bool {
        match self.current_step.next() {
            Some(next) => {
                self.current_step = next;
                true
            }
            None => false,
        }
    }

    /// Step back. Returns `false` on the first step.
    pub fn previous_step(&mut self) -> bool {
        match self.current_step.previous() {
            Some(previous) => {
                self.current_step = previous;
                true
            }
            None => false,
        }
    }

    // ---- promises ----

    pub fn promise_candidates(&self) -> Vec<PromiseCandidate> {
        promise_candidates(&self.form)
    }

    /// Rows to create for the current promise drafts.
    pub fn promise_rows(&self, audit_id: &str) -> Result<Vec<ReductionPromise>, FieldErrors> {
        validate_promise_set(&self.form.promises, &self.policy)?;
        self.form
            .promises
            .iter()
            .map(|draft| draft.to_promise(audit_id))
            .collect()
    }

    /// Rows the backend has not stored yet: no backend id and not
    /// accepted earlier in this session.
    pub fn pending_promise_rows(
        &self,
        audit_id: &str,
    ) -> Result<Vec<ReductionPromise>, FieldErrors> {
        Ok(self
            .promise_rows(audit_id)?
            .into_iter()
            .filter(|row| {
                row.id.is_none() && !self.created_promises.contains(&row.plastic_item_type)
            })
            .collect())
    }

    /// Mark a promise as created and attach its backend id, if the
    /// response carried one, to the matching draft.
    pub fn record_created_promise(&mut self, created: &ReductionPromise) {
        self.created_promises.insert(created.plastic_item_type.clone());
        if let Some(draft) = self
            .form
            .promises
            .iter_mut()
            .find(|d| d.id.is_none() && d.plastic_item_type == created.plastic_item_type)
        {
            draft.id = created.id.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::YesNo;
    use crate::catalog::ItemKind;
    use crate::count::Count;
    use crate::promise::TimeframeUnit;
    use serde_json::json;

    fn complete_form() -> AuditForm {
        let mut form = AuditForm::default();
        form.part1.school_name = "Hillside Primary".into();
        form.part1.number_of_students = Count::from("300");
        form.part1.auditor_name = "Year 5 Eco Club".into();
        form.part1.audit_date = "2026-03-02".into();
        form.part2
            .lunchroom
            .counts
            .set(ItemKind::PlasticBottles, Count::from("2"));
        form.part3.staffroom.selected = Some(true);
        form.part3
            .staffroom
            .counts
            .set(ItemKind::PlasticBottles, Count::from("3"));
        form.part4.has_recycling_bins = Some(YesNo::Yes);
        form.part4.recycles_plastic = Some(YesNo::Yes);
        form.part4.has_compost_bin = Some(YesNo::No);
        form.part4.plastic_bag_policy = Some(YesNo::No);
        form.part4.waste_collection_frequency = "weekly".into();
        form
    }

    fn promise(item: &str) -> PromiseDraft {
        PromiseDraft {
            id: None,
            plastic_item_type: item.into(),
            plastic_item_label: item.into(),
            baseline_quantity: 380,
            target_quantity: 200,
            timeframe_unit: Some(TimeframeUnit::Year),
        }
    }

    // -- WizardStep --

    #[test]
    fn step_from_number_valid() {
        assert_eq!(WizardStep::from_number(1).unwrap(), WizardStep::SchoolInfo);
        assert_eq!(
            WizardStep::from_number(6).unwrap(),
            WizardStep::ReductionPromises
        );
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(7).is_err());
    }

    #[test]
    fn step_to_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(WizardStep::from_number(n).unwrap().to_number(), n);
        }
        assert_eq!(WizardStep::ALL.len(), TOTAL_STEPS as usize);
    }

    #[test]
    fn step_neighbours_stop_at_bounds() {
        assert_eq!(WizardStep::SchoolInfo.previous(), None);
        assert_eq!(WizardStep::ReductionPromises.next(), None);
        assert_eq!(WizardStep::Rooms.next(), Some(WizardStep::WasteManagement));
        assert!(WizardStep::ReductionPromises.is_last());
    }

    // -- validate_step --

    #[test]
    fn complete_form_passes_every_step() {
        assert!(validate_all(&complete_form(), &PromisePolicy::default()).is_ok());
    }

    #[test]
    fn results_step_always_passes() {
        let form = AuditForm::default();
        assert!(validate_step(&form, WizardStep::Results, &PromisePolicy::default()).is_ok());
    }

    #[test]
    fn school_info_requires_student_count() {
        let mut form = complete_form();
        form.part1.number_of_students = AuditForm::default().part1.number_of_students;
        let errors =
            validate_step(&form, WizardStep::SchoolInfo, &PromisePolicy::default()).unwrap_err();
        assert!(errors.contains("numberOfStudents"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn rooms_step_requires_a_selection() {
        let mut form = complete_form();
        form.part3.staffroom.selected = Some(false);
        let errors =
            validate_step(&form, WizardStep::Rooms, &PromisePolicy::default()).unwrap_err();
        assert!(errors.contains("rooms"));
    }

    #[test]
    fn other_count_needs_description() {
        let mut form = complete_form();
        form.part2.lunchroom.other = Some(Count::from("2"));
        let errors = validate_step(&form, WizardStep::LunchroomPlayground, &PromisePolicy::default())
            .unwrap_err();
        assert!(errors.contains("lunchroom.otherDescription"));

        form.part2.lunchroom.other_description = Some("sauce sachets".into());
        assert!(
            validate_step(&form, WizardStep::LunchroomPlayground, &PromisePolicy::default())
                .is_ok()
        );
    }

    #[test]
    fn unselected_rooms_are_not_checked() {
        let mut form = complete_form();
        form.part3.gym.other = Some(Count::from("4"));
        assert!(validate_step(&form, WizardStep::Rooms, &PromisePolicy::default()).is_ok());
    }

    #[test]
    fn school_info_reports_camel_case_fields() {
        let mut form = complete_form();
        form.part1.school_name = " ".into();
        let errors =
            validate_step(&form, WizardStep::SchoolInfo, &PromisePolicy::default()).unwrap_err();
        assert!(errors.contains("schoolName"));
    }

    #[test]
    fn validate_all_lists_each_failing_step() {
        let mut form = complete_form();
        form.part1.auditor_name.clear();
        form.part4.has_compost_bin = None;
        let failures = validate_all(&form, &PromisePolicy::default()).unwrap_err();
        let steps: Vec<WizardStep> = failures.iter().map(|f| f.step).collect();
        assert_eq!(steps, [WizardStep::SchoolInfo, WizardStep::WasteManagement]);
    }

    #[test]
    fn promise_step_uses_policy() {
        let mut form = complete_form();
        form.promises.push(promise("lunchroom.plasticBottles"));
        assert!(validate_step(&form, WizardStep::ReductionPromises, &PromisePolicy::default())
            .is_err());
        assert!(validate_step(
            &form,
            WizardStep::ReductionPromises,
            &PromisePolicy { min_promises: 1 }
        )
        .is_ok());
    }

    // -- WizardState --

    fn stored_record() -> AuditDraft {
        serde_json::from_value(json!({
            "id": "audit-7",
            "schoolId": "school-1",
            "currentPart": 3,
            "status": "draft",
            "part1Data": { "schoolName": "Hillside Primary", "numberOfStudents": "300" },
            "part2Data": { "lunchroom": { "plasticBottles": "2" } },
            "part3Data": {
                "office": { "plasticBottles": "1" },
                "gym": { "selected": false, "binLiners": "6" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn restore_reproduces_step_and_fields() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        assert_eq!(state.load_state(), LoadState::NotLoaded);
        assert!(state.restore(stored_record(), &[]));

        assert_eq!(state.load_state(), LoadState::Loaded);
        assert_eq!(state.current_step(), WizardStep::Rooms);
        assert_eq!(state.audit_id(), Some("audit-7"));
        assert_eq!(state.form().part1.school_name, "Hillside Primary");
        assert_eq!(state.form().part2.lunchroom.count(ItemKind::PlasticBottles), 2);
        assert_eq!(state.form().part3.office.selected, Some(true));
        assert_eq!(state.form().part3.gym.selected, Some(false));
        assert_eq!(state.form().part3.gym.count(ItemKind::BinLiners), 6);
        assert_eq!(state.form().part3.library.selected, Some(false));
    }

    #[test]
    fn restore_runs_only_once() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.restore(stored_record(), &[]);
        state.form_mut().part1.school_name = "Edited".into();

        assert!(!state.restore(stored_record(), &[]));
        assert_eq!(state.form().part1.school_name, "Edited");
    }

    #[test]
    fn restore_clamps_unknown_part_to_first_step() {
        let mut record = stored_record();
        record.current_part = 42;
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.restore(record, &[]);
        assert_eq!(state.current_step(), WizardStep::SchoolInfo);
    }

    #[test]
    fn restore_brings_back_promises() {
        let rows = vec![
            promise("a").to_promise("audit-7").unwrap(),
            promise("b").to_promise("audit-7").unwrap(),
        ];
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.restore(stored_record(), &rows);
        assert_eq!(state.form().promises.len(), 2);
        assert_eq!(state.form().promises[1].plastic_item_type, "b");
    }

    #[test]
    fn prefill_only_before_load() {
        let profile = SchoolProfile {
            id: "school-1".into(),
            name: "Hillside Primary".into(),
            number_of_students: Some(280),
        };
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        assert!(state.prefill(&profile));
        assert_eq!(state.form().part1.number_of_students.as_str(), "280");
        assert!(!state.prefill(&profile));
    }

    #[test]
    fn draft_payload_carries_metrics_and_draft_status() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        *state.form_mut() = complete_form();
        let payload = state.draft_payload(WizardStep::Rooms).unwrap();
        assert_eq!(payload.status, AuditStatus::Draft);
        assert_eq!(payload.current_part, 3);
        assert_eq!(payload.id, None);
        assert_eq!(payload.total_plastic_items, 950);
        assert_eq!(payload.top_problem_plastics[0].name, "plastic bottles");
        assert_eq!(
            payload.results_data.as_ref().map(|m| m.total_plastic_items),
            Some(950)
        );
    }

    #[test]
    fn draft_payload_refused_after_submission() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.mark_submitted().unwrap();
        assert!(state.draft_payload(WizardStep::Results).is_err());
        assert!(state.ensure_editable().is_err());
    }

    #[test]
    fn adopt_saved_keeps_first_id() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        let mut record = stored_record();
        state.adopt_saved(&record);
        assert_eq!(state.audit_id(), Some("audit-7"));

        record.id = Some("other".into());
        state.adopt_saved(&record);
        assert_eq!(state.audit_id(), Some("audit-7"));
    }

    #[test]
    fn navigation_is_bounded() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        assert!(!state.previous_step());
        for _ in 1..TOTAL_STEPS {
            assert!(state.next_step());
        }
        assert!(!state.next_step());
        assert_eq!(state.current_step(), WizardStep::ReductionPromises);
    }

    #[test]
    fn promise_rows_compute_reduction() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.form_mut().promises = vec![promise("a"), promise("b")];
        let rows = state.promise_rows("audit-7").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.reduction_amount == 180));
    }

    #[test]
    fn created_promises_are_no_longer_pending() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.form_mut().promises = vec![promise("a"), promise("b")];

        let mut created = promise("b").to_promise("audit-7").unwrap();
        created.id = Some("p-2".into());
        state.record_created_promise(&created);

        let pending = state.pending_promise_rows("audit-7").unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].plastic_item_type, "a");
        assert_eq!(state.form().promises[1].id.as_deref(), Some("p-2"));
    }

    #[test]
    fn created_promise_without_id_is_not_pending() {
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.form_mut().promises = vec![promise("a"), promise("b")];

        let created = promise("a").to_promise("audit-7").unwrap();
        assert_eq!(created.id, None);
        state.record_created_promise(&created);

        let pending = state.pending_promise_rows("audit-7").unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].plastic_item_type, "b");
    }

    #[test]
    fn restore_drops_counts_outside_the_room_catalog() {
        let mut record = stored_record();
        record
            .part2_data
            .lunchroom
            .counts
            .set(ItemKind::BinLiners, Count::from("4"));
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.restore(record, &[]);

        assert_eq!(state.form().part2.lunchroom.counts.get(ItemKind::BinLiners), None);
        let payload = state.draft_payload(WizardStep::Rooms).unwrap();
        assert!(payload.part2_data.lunchroom.counts.get(ItemKind::BinLiners).is_none());
        // 2 lunchroom bottles, 1 office bottle and 6 gym bin liners a day.
        assert_eq!(payload.total_plastic_items, 9 * 190);
    }

    #[test]
    fn rejected_audit_can_be_saved_again() {
        let mut record = stored_record();
        record.status = AuditStatus::Rejected;
        record.review_notes = Some("Please recount the lunchroom".into());
        let mut state = WizardState::new("school-1", PromisePolicy::default());
        state.restore(record, &[]);
        assert_eq!(state.review_notes(), Some("Please recount the lunchroom"));
        assert!(state.ensure_editable().is_ok());
        assert_eq!(
            state.draft_payload(WizardStep::Rooms).unwrap().status,
            AuditStatus::Draft
        );
    }
}
