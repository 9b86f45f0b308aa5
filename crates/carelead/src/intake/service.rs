use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::answers::Answers;
use super::blueprint::{WizardBlueprint, WizardKind};
use super::controller::{Completion, SubmissionState, WizardController, WizardError};
use super::jobs::{JobContext, JobListing, JobsEnvelope};
use super::lead::LeadSubmitter;
use crate::admin::SourceError;
use crate::config::IntakeConfig;

/// Read side of the careers page.
pub trait JobBoard: Send + Sync {
    fn listings(&self) -> Result<Vec<JobListing>, SourceError>;
}

/// Answers posted by a browser that walked through a wizard.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WizardSubmissionRequest {
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub job: Option<JobContext>,
}

/// Mirrors the backend `{ success, message }` reply, plus the host instruction on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<Completion>,
}

/// Server-side facade over the wizard catalog, the lead sink, and the job board.
pub struct IntakeService<S, J> {
    blueprints: HashMap<WizardKind, Arc<WizardBlueprint>>,
    submitter: Arc<S>,
    jobs: Arc<J>,
    config: IntakeConfig,
}

impl<S, J> IntakeService<S, J>
where
    S: LeadSubmitter + 'static,
    J: JobBoard + 'static,
{
    pub fn new(submitter: Arc<S>, jobs: Arc<J>, config: IntakeConfig) -> Self {
        let blueprints = WizardKind::ordered()
            .into_iter()
            .map(|kind| (kind, Arc::new(WizardBlueprint::for_kind(kind, &config))))
            .collect();

        Self {
            blueprints,
            submitter,
            jobs,
            config,
        }
    }

    pub fn blueprint(&self, kind: WizardKind) -> Option<Arc<WizardBlueprint>> {
        self.blueprints.get(&kind).cloned()
    }

    /// Replays the posted answers through a controller, then submits once.
    pub fn submit(
        &self,
        kind: WizardKind,
        request: &WizardSubmissionRequest,
    ) -> Result<WizardSubmissionResponse, WizardError> {
        let blueprint = self.blueprint(kind).ok_or(WizardError::NotReady)?;
        let mut controller =
            WizardController::replay(blueprint, &request.answers, request.job.as_ref())?
                .with_success_delay(self.config.success_close_delay());

        let state = controller.submit(self.submitter.as_ref())?.clone();
        let completion = controller.completion();

        Ok(match state {
            SubmissionState::Success(message) => WizardSubmissionResponse {
                success: true,
                message,
                completion,
            },
            SubmissionState::Failure(message) => WizardSubmissionResponse {
                success: false,
                message,
                completion: None,
            },
            SubmissionState::NotSubmitted => WizardSubmissionResponse {
                success: false,
                message: String::new(),
                completion: None,
            },
        })
    }

    /// Job listings, or an unsuccessful envelope when the board cannot be read.
    pub fn job_listings(&self) -> JobsEnvelope {
        match self.jobs.listings() {
            Ok(jobs) => JobsEnvelope {
                success: true,
                jobs,
            },
            Err(err) => {
                warn!(error = %err, "job board unavailable");
                JobsEnvelope::default()
            }
        }
    }
}
