use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::answers::Answers;
use super::blueprint::{CompletionAction, WizardBlueprint};
use super::jobs::JobContext;
use super::lead::{LeadSubmission, LeadSubmitter, SubmitError, SubmitReceipt};
use super::step::StepDescriptor;
use crate::config::IntakeConfig;

/// Shown when the lead endpoint could not be reached or gave no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong while sending your information. Please try again.";

/// Used when the backend accepts a lead without saying anything.
pub const GENERIC_SUCCESS_MESSAGE: &str = "Thank you! We'll be in touch shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Forward,
    Backward,
}

/// How the wizard reacts to Back on its first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackBehavior {
    /// Mounted on its own page; Back is disabled on step 1.
    Standalone,
    /// Embedded in a larger flow whose host handles Back on step 1.
    Embedded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved,
    DelegateToHost,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionState {
    NotSubmitted,
    Success(String),
    Failure(String),
}

/// Host instruction produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    #[serde(with = "duration_millis")]
    pub after: Duration,
    pub action: CompletionAction,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("field '{0}' is not answered on the current step")]
    FieldNotOnStep(String),
    #[error("'{value}' is not an option for '{field}'")]
    UnknownOption { field: String, value: String },
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),
    #[error("step {step} is incomplete")]
    IncompleteStep { step: usize },
    #[error("the wizard is not ready to submit")]
    NotReady,
}

/// Step sequencing, answer accumulation, and the single terminal submission for one wizard.
#[derive(Debug, Clone)]
pub struct WizardController {
    blueprint: Arc<WizardBlueprint>,
    back_behavior: BackBehavior,
    success_delay: Duration,
    current_step: usize,
    direction: StepDirection,
    answers: Answers,
    seeded: Answers,
    submission: SubmissionState,
    submitting: bool,
}

impl WizardController {
    pub fn new(blueprint: Arc<WizardBlueprint>, back_behavior: BackBehavior) -> Self {
        Self {
            blueprint,
            back_behavior,
            success_delay: Duration::from_millis(IntakeConfig::DEFAULT_CLOSE_DELAY_MS),
            current_step: 1,
            direction: StepDirection::Forward,
            answers: Answers::new(),
            seeded: Answers::new(),
            submission: SubmissionState::NotSubmitted,
            submitting: false,
        }
    }

    pub fn with_success_delay(mut self, delay: Duration) -> Self {
        self.success_delay = delay;
        self
    }

    /// Seeds the host-provided job details; they survive `reset`.
    pub fn with_job_context(mut self, context: &JobContext) -> Self {
        self.seeded.set_text("jobId", &context.job_id);
        self.seeded.set_text("jobTitle", &context.job_title);
        self.seeded.set_text("searchLocation", &context.search_location);
        self.answers = self.seeded.clone();
        self
    }

    pub fn blueprint(&self) -> &WizardBlueprint {
        &self.blueprint
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.blueprint.step_count()
    }

    pub fn direction(&self) -> StepDirection {
        self.direction
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn current_descriptor(&self) -> Option<&'static StepDescriptor> {
        self.blueprint.step(self.current_step)
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step >= self.step_count()
    }

    /// Completion predicate of the step on screen.
    pub fn can_advance(&self) -> bool {
        self.current_descriptor()
            .is_some_and(|step| step.is_complete(&self.answers))
    }

    /// Contact-form heading; depends on who the care is for.
    pub fn contact_heading(&self) -> Option<&'static str> {
        self.blueprint.steps().iter().find_map(|step| match step {
            StepDescriptor::ContactForm { heading, .. } => Some(heading.resolve(&self.answers)),
            _ => None,
        })
    }

    /// Moves to the next step when the current one is complete. Returns whether it moved.
    pub fn go_next(&mut self) -> bool {
        if self.is_last_step() || !self.can_advance() {
            return false;
        }
        self.current_step += 1;
        self.direction = StepDirection::Forward;
        true
    }

    pub fn go_back(&mut self) -> BackOutcome {
        if self.current_step > 1 {
            self.current_step -= 1;
            self.direction = StepDirection::Backward;
            return BackOutcome::Moved;
        }

        match self.back_behavior {
            BackBehavior::Embedded => BackOutcome::DelegateToHost,
            BackBehavior::Standalone => BackOutcome::Disabled,
        }
    }

    /// Records a single-choice answer and advances straight away.
    pub fn select_single(&mut self, field: &str, value: &str) -> Result<bool, WizardError> {
        match self.current_descriptor() {
            Some(step @ StepDescriptor::Choice { field: expected, .. }) if *expected == field => {
                if step.option(value).is_none() {
                    return Err(unknown_option(field, value));
                }
            }
            _ => return Err(WizardError::FieldNotOnStep(field.to_string())),
        }

        self.answers.set_text(field, value);
        Ok(self.go_next())
    }

    /// Flips one selection on a multi-choice step; never advances.
    pub fn toggle_multi(&mut self, field: &str, value: &str) -> Result<bool, WizardError> {
        match self.current_descriptor() {
            Some(step @ StepDescriptor::MultiChoice { field: expected, .. })
                if *expected == field =>
            {
                if step.option(value).is_none() {
                    return Err(unknown_option(field, value));
                }
            }
            _ => return Err(WizardError::FieldNotOnStep(field.to_string())),
        }

        Ok(self.answers.toggle(field, value))
    }

    /// Overwrites a contact field with the normalized input.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), WizardError> {
        let contact = self
            .blueprint
            .contact_field(field)
            .ok_or_else(|| WizardError::FieldNotOnStep(field.to_string()))?;
        self.answers.set_text(field, contact.kind.normalize(value));
        Ok(())
    }

    pub fn set_flag(&mut self, field: &str, value: bool) -> Result<(), WizardError> {
        let flag = self
            .blueprint
            .consent_flag(field)
            .ok_or_else(|| WizardError::FieldNotOnStep(field.to_string()))?;
        self.answers.set_flag(flag.name, value);
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
            && !matches!(self.submission, SubmissionState::Success(_))
            && self.is_last_step()
            && self.can_advance()
    }

    /// Encodes the answers and marks a submission as in flight. Until it is settled,
    /// `can_submit` is false and a second call is refused.
    pub fn begin_submit(&mut self) -> Result<LeadSubmission, WizardError> {
        if !self.can_submit() {
            return Err(WizardError::NotReady);
        }

        let lead = self.blueprint.encode_lead(&self.answers)?;
        self.submitting = true;
        debug!(
            wizard = self.blueprint.kind().slug(),
            endpoint = lead.endpoint(),
            "submitting lead"
        );
        Ok(lead)
    }

    /// Records the backend's answer to the in-flight submission. A failed attempt keeps
    /// every answer so the visitor can fix things and try again after `clear_failure`.
    pub fn settle_submission(
        &mut self,
        outcome: Result<SubmitReceipt, SubmitError>,
    ) -> &SubmissionState {
        if !self.submitting {
            debug!("no submission in flight; outcome dropped");
            return &self.submission;
        }
        self.submitting = false;

        let kind = self.blueprint.kind().slug();
        self.submission = match outcome {
            Ok(receipt) if receipt.success => {
                info!(wizard = kind, "lead accepted");
                let message = if receipt.message.trim().is_empty() {
                    GENERIC_SUCCESS_MESSAGE.to_string()
                } else {
                    receipt.message
                };
                SubmissionState::Success(message)
            }
            Ok(receipt) => {
                warn!(wizard = kind, message = %receipt.message, "lead rejected by backend");
                let message = if receipt.message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    receipt.message
                };
                SubmissionState::Failure(message)
            }
            Err(err) => {
                warn!(wizard = kind, error = %err, "lead submission failed");
                SubmissionState::Failure(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };

        &self.submission
    }

    /// Sends the accumulated answers once through a blocking submitter.
    pub fn submit<S>(&mut self, submitter: &S) -> Result<&SubmissionState, WizardError>
    where
        S: LeadSubmitter + ?Sized,
    {
        let lead = self.begin_submit()?;
        let outcome = submitter.submit(&lead);
        Ok(self.settle_submission(outcome))
    }

    /// Returns a failed submission to the editable state.
    pub fn clear_failure(&mut self) {
        if matches!(self.submission, SubmissionState::Failure(_)) {
            self.submission = SubmissionState::NotSubmitted;
        }
    }

    /// What the host should do after a successful submission.
    pub fn completion(&self) -> Option<Completion> {
        match self.submission {
            SubmissionState::Success(_) => Some(Completion {
                after: self.success_delay,
                action: self.blueprint.completion().clone(),
            }),
            _ => None,
        }
    }

    /// Back to a fresh wizard; host-provided context is kept.
    pub fn reset(&mut self) {
        self.current_step = 1;
        self.direction = StepDirection::Forward;
        self.answers = self.seeded.clone();
        self.submission = SubmissionState::NotSubmitted;
        self.submitting = false;
    }

    /// Drives a fresh controller through `answers` exactly as a visitor would, step by step.
    /// Fails on the first step whose completion predicate does not hold.
    pub fn replay(
        blueprint: Arc<WizardBlueprint>,
        answers: &Answers,
        context: Option<&JobContext>,
    ) -> Result<Self, WizardError> {
        let mut controller = Self::new(blueprint, BackBehavior::Standalone);
        if let Some(context) = context {
            controller = controller.with_job_context(context);
        }

        loop {
            let step = controller
                .current_descriptor()
                .ok_or(WizardError::NotReady)?;
            let position = controller.current_step;
            controller.replay_step(step, answers)?;

            // Choice steps advance on their own.
            if controller.current_step != position {
                continue;
            }
            if !controller.can_advance() {
                return Err(WizardError::IncompleteStep { step: position });
            }
            if controller.is_last_step() {
                return Ok(controller);
            }
            controller.go_next();
        }
    }

    fn replay_step(
        &mut self,
        step: &StepDescriptor,
        answers: &Answers,
    ) -> Result<(), WizardError> {
        match *step {
            StepDescriptor::Choice { field, .. } => {
                if let Some(value) = answers.text(field) {
                    self.select_single(field, value)?;
                }
            }
            StepDescriptor::MultiChoice { field, .. } => {
                for value in answers.selections(field) {
                    if !self.answers.selections(field).contains(value) {
                        self.toggle_multi(field, value)?;
                    }
                }
            }
            StepDescriptor::ContactForm {
                fields, consent, ..
            } => {
                for contact in fields {
                    if let Some(value) = answers.text(contact.name) {
                        self.set_field(contact.name, value)?;
                    }
                }
                if let Some(flag) = consent.filter(|flag| answers.get(flag.name).is_some()) {
                    self.set_flag(flag.name, answers.flag(flag.name))?;
                }
            }
        }
        Ok(())
    }
}

fn unknown_option(field: &str, value: &str) -> WizardError {
    WizardError::UnknownOption {
        field: field.to_string(),
        value: value.to_string(),
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }
}
