//! Shared fixtures for the client integration tests: an in-memory
//! [`AuditBackend`] that records every call and can be told to fail.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use ecoaudit_client::backend::{
    AuditBackend, PrintableFormSubmission, SignedUpload, SignedUrlRequest,
};
use ecoaudit_client::error::ApiError;
use ecoaudit_core::audit::{AuditDraft, AuditForm, YesNo};
use ecoaudit_core::catalog::ItemKind;
use ecoaudit_core::count::Count;
use ecoaudit_core::promise::{PromiseDraft, ReductionPromise, TimeframeUnit};
use ecoaudit_core::school::SchoolProfile;

pub const SCHOOL_ID: &str = "school-1";

#[derive(Default)]
struct Inner {
    school: Option<SchoolProfile>,
    audit: Option<AuditDraft>,
    promises: Vec<ReductionPromise>,
    calls: Vec<String>,
    saved: Vec<AuditDraft>,
    uploaded: Vec<(String, usize)>,
    submissions: Vec<PrintableFormSubmission>,
    next_id: u32,
    fail_save: bool,
    fail_submit: bool,
    fail_promise_items: HashSet<String>,
    fail_signed_url: bool,
    fail_put: bool,
    fail_record: bool,
    omit_promise_ids: bool,
}

/// In-memory backend. Ids are handed out as `<prefix>-<n>`.
#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<Inner>,
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        body: "internal error".into(),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_school(self, name: &str, students: u64) -> Self {
        self.inner.lock().unwrap().school = Some(SchoolProfile {
            id: SCHOOL_ID.into(),
            name: name.into(),
            number_of_students: Some(students),
        });
        self
    }

    pub fn with_audit(self, audit: AuditDraft) -> Self {
        self.inner.lock().unwrap().audit = Some(audit);
        self
    }

    pub fn with_promises(self, promises: Vec<ReductionPromise>) -> Self {
        self.inner.lock().unwrap().promises = promises;
        self
    }

    pub fn fail_save(&self, fail: bool) {
        self.inner.lock().unwrap().fail_save = fail;
    }

    pub fn fail_submit(&self, fail: bool) {
        self.inner.lock().unwrap().fail_submit = fail;
    }

    /// Make `create_promise` fail for the given item types.
    pub fn fail_promises_for(&self, items: &[&str]) {
        self.inner.lock().unwrap().fail_promise_items =
            items.iter().map(|i| i.to_string()).collect();
    }

    /// Answer `create_promise` without an id, as some deployments do.
    pub fn omit_promise_ids(&self) {
        self.inner.lock().unwrap().omit_promise_ids = true;
    }

    pub fn fail_signed_url(&self) {
        self.inner.lock().unwrap().fail_signed_url = true;
    }

    pub fn fail_put(&self) {
        self.inner.lock().unwrap().fail_put = true;
    }

    pub fn fail_record(&self) {
        self.inner.lock().unwrap().fail_record = true;
    }

    /// Call names in order, e.g. `["find_audit", "get_school"]`.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    pub fn saved(&self) -> Vec<AuditDraft> {
        self.inner.lock().unwrap().saved.clone()
    }

    pub fn stored_promises(&self) -> Vec<ReductionPromise> {
        self.inner.lock().unwrap().promises.clone()
    }

    pub fn uploaded(&self) -> Vec<(String, usize)> {
        self.inner.lock().unwrap().uploaded.clone()
    }

    pub fn submissions(&self) -> Vec<PrintableFormSubmission> {
        self.inner.lock().unwrap().submissions.clone()
    }
}

impl Inner {
    fn record(&mut self, call: &str) {
        self.calls.push(call.to_string());
    }

    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

#[async_trait]
impl AuditBackend for FakeBackend {
    async fn get_school(&self, _school_id: &str) -> Result<SchoolProfile, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("get_school");
        inner.school.clone().ok_or(ApiError::Status {
            status: 404,
            body: "school not found".into(),
        })
    }

    async fn find_audit_for_school(
        &self,
        _school_id: &str,
    ) -> Result<Option<AuditDraft>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("find_audit");
        Ok(inner.audit.clone())
    }

    async fn save_audit(&self, draft: &AuditDraft) -> Result<AuditDraft, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("save_audit");
        if inner.fail_save {
            return Err(server_error());
        }
        let mut stored = draft.clone();
        if stored.id.is_none() {
            stored.id = Some(inner.id("audit"));
        }
        inner.saved.push(draft.clone());
        inner.audit = Some(stored.clone());
        Ok(stored)
    }

    async fn submit_audit(&self, _audit_id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("submit_audit");
        if inner.fail_submit {
            return Err(server_error());
        }
        Ok(())
    }

    async fn download_results_pdf(&self, _audit_id: &str) -> Result<Vec<u8>, ApiError> {
        self.inner.lock().unwrap().record("download_pdf");
        Ok(b"%PDF-1.7".to_vec())
    }

    async fn create_promise(
        &self,
        promise: &ReductionPromise,
    ) -> Result<ReductionPromise, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("create_promise");
        if inner.fail_promise_items.contains(&promise.plastic_item_type) {
            return Err(server_error());
        }
        let mut stored = promise.clone();
        stored.id = Some(inner.id("promise"));
        inner.promises.push(stored.clone());
        if inner.omit_promise_ids {
            stored.id = None;
        }
        Ok(stored)
    }

    async fn list_promises(&self, audit_id: &str) -> Result<Vec<ReductionPromise>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("list_promises");
        Ok(inner
            .promises
            .iter()
            .filter(|p| p.audit_id == audit_id)
            .cloned()
            .collect())
    }

    async fn request_upload_url(
        &self,
        request: &SignedUrlRequest,
    ) -> Result<SignedUpload, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("signed_url");
        if inner.fail_signed_url {
            return Err(server_error());
        }
        let object_path = format!("/objects/uploads/{}", inner.id("obj"));
        Ok(SignedUpload {
            upload_url: format!("https://storage.test{object_path}?sig={}", request.file_name),
            object_path,
        })
    }

    async fn put_object(
        &self,
        upload_url: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("put_object");
        if inner.fail_put {
            return Err(ApiError::Status {
                status: 403,
                body: "signature expired".into(),
            });
        }
        inner.uploaded.push((upload_url.to_string(), bytes.len()));
        Ok(())
    }

    async fn record_form_submission(
        &self,
        submission: &PrintableFormSubmission,
    ) -> Result<PrintableFormSubmission, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("record_submission");
        if inner.fail_record {
            return Err(server_error());
        }
        let mut stored = submission.clone();
        stored.id = Some(inner.id("form"));
        inner.submissions.push(stored.clone());
        Ok(stored)
    }
}

// ---------------------------------------------------------------------------
// Form fixtures
// ---------------------------------------------------------------------------

/// A form where every step passes validation, without promises.
pub fn complete_form() -> AuditForm {
    let mut form = AuditForm::default();
    form.part1.school_name = "Hillside Primary".into();
    form.part1.number_of_students = Count::from("300");
    form.part1.auditor_name = "Year 5 Eco Club".into();
    form.part1.audit_date = "2026-03-02".into();
    form.part2
        .lunchroom
        .counts
        .set(ItemKind::PlasticBottles, Count::from("6"));
    form.part2
        .lunchroom
        .counts
        .set(ItemKind::SnackWrappers, Count::from("4"));
    form.part3.staffroom.selected = Some(true);
    form.part3
        .staffroom
        .counts
        .set(ItemKind::PlasticCups, Count::from("2"));
    form.part4.has_recycling_bins = Some(YesNo::Yes);
    form.part4.recycles_plastic = Some(YesNo::Yes);
    form.part4.has_compost_bin = Some(YesNo::No);
    form.part4.plastic_bag_policy = Some(YesNo::No);
    form.part4.waste_collection_frequency = "weekly".into();
    form
}

/// A valid promise on `item` reducing a baseline of 1140 to 600.
pub fn promise(item: &str, label: &str) -> PromiseDraft {
    PromiseDraft {
        id: None,
        plastic_item_type: item.into(),
        plastic_item_label: label.into(),
        baseline_quantity: 1140,
        target_quantity: 600,
        timeframe_unit: Some(TimeframeUnit::Year),
    }
}
