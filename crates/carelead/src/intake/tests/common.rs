use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::admin::SourceError;
use crate::config::IntakeConfig;
use crate::intake::{
    BackBehavior, IntakeService, JobBoard, JobListing, LeadSubmission, LeadSubmitter,
    SubmitError, SubmitReceipt, WizardBlueprint, WizardController, WizardKind,
};

/// Records every lead and answers with a scripted receipt.
pub(super) struct RecordingSubmitter {
    receipt: SubmitReceipt,
    leads: Mutex<Vec<LeadSubmission>>,
}

impl RecordingSubmitter {
    pub(super) fn accepting() -> Self {
        Self::replying(SubmitReceipt::accepted("Thanks, we'll call you soon."))
    }

    pub(super) fn replying(receipt: SubmitReceipt) -> Self {
        Self {
            receipt,
            leads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn leads(&self) -> Vec<LeadSubmission> {
        self.leads.lock().expect("lead mutex poisoned").clone()
    }
}

impl LeadSubmitter for RecordingSubmitter {
    fn submit(&self, lead: &LeadSubmission) -> Result<SubmitReceipt, SubmitError> {
        self.leads
            .lock()
            .expect("lead mutex poisoned")
            .push(lead.clone());
        Ok(self.receipt.clone())
    }
}

pub(super) struct UnreachableSubmitter;

impl LeadSubmitter for UnreachableSubmitter {
    fn submit(&self, _lead: &LeadSubmission) -> Result<SubmitReceipt, SubmitError> {
        Err(SubmitError::Unreachable("connection refused".to_string()))
    }
}

#[derive(Default)]
pub(super) struct StaticJobBoard {
    pub(super) listings: Vec<JobListing>,
}

impl JobBoard for StaticJobBoard {
    fn listings(&self) -> Result<Vec<JobListing>, SourceError> {
        Ok(self.listings.clone())
    }
}

pub(super) struct OfflineJobBoard;

impl JobBoard for OfflineJobBoard {
    fn listings(&self) -> Result<Vec<JobListing>, SourceError> {
        Err(SourceError::Unavailable("timeout".to_string()))
    }
}

pub(super) fn listing() -> JobListing {
    JobListing {
        id: "job-12".to_string(),
        title: "Personal Support Worker".to_string(),
        location: "Brampton".to_string(),
        category: Some("caregiver".to_string()),
        service_type: Some("in_home_care".to_string()),
        summary: None,
    }
}

pub(super) fn blueprint(kind: WizardKind) -> Arc<WizardBlueprint> {
    Arc::new(WizardBlueprint::for_kind(kind, &IntakeConfig::default()))
}

pub(super) fn controller(kind: WizardKind) -> WizardController {
    WizardController::new(blueprint(kind), BackBehavior::Standalone)
}

pub(super) fn fill_care_contact(controller: &mut WizardController) {
    for (field, value) in [
        ("firstName", "Ada"),
        ("lastName", "Lovelace"),
        ("phone", "555 123 4567"),
        ("email", "ada@example.com"),
        ("postalCode", "l5b 1a1"),
    ] {
        controller.set_field(field, value).expect("care contact field");
    }
}

pub(super) fn fill_job_contact(controller: &mut WizardController) {
    for (field, value) in [
        ("firstName", "Grace"),
        ("lastName", "Hopper"),
        ("mobileNumber", "5559876543"),
        ("email", "grace@example.com"),
    ] {
        controller.set_field(field, value).expect("job contact field");
    }
}

/// In-home care wizard sitting on its contact step with everything filled in.
pub(super) fn ready_in_home_care() -> WizardController {
    let mut controller = controller(WizardKind::InHomeCare);
    controller
        .select_single("whoNeedsCare", "me")
        .expect("choice accepted");
    controller
        .toggle_multi("assistanceTypes", "everyday_tasks")
        .expect("toggle accepted");
    assert!(controller.go_next());
    fill_care_contact(&mut controller);
    controller
}

pub(super) fn intake_service<S>(
    submitter: Arc<S>,
) -> Arc<IntakeService<S, StaticJobBoard>>
where
    S: LeadSubmitter + 'static,
{
    Arc::new(IntakeService::new(
        submitter,
        Arc::new(StaticJobBoard {
            listings: vec![listing()],
        }),
        IntakeConfig::default(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
