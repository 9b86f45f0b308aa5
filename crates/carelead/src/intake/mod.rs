//! Lead-capture wizards.
//!
//! Every wizard on the site (in-home care, companion care, adult companion care, family
//! caregiver eligibility, job applications) is one [`WizardBlueprint`] interpreted by the same
//! [`WizardController`]: a fixed list of choice, multi-choice, and contact-form steps that
//! accumulate [`Answers`] and end in a single submission.

pub mod answers;
pub mod blueprint;
pub mod controller;
pub mod fields;
pub mod jobs;
pub mod lead;
pub mod router;
pub mod service;
pub mod step;

#[cfg(test)]
mod tests;

pub use answers::{AnswerValue, Answers};
pub use blueprint::{CompletionAction, WizardBlueprint, WizardKind};
pub use controller::{
    BackBehavior, BackOutcome, Completion, StepDirection, SubmissionState, WizardController,
    WizardError, GENERIC_FAILURE_MESSAGE, GENERIC_SUCCESS_MESSAGE,
};
pub use fields::FieldKind;
pub use jobs::{JobContext, JobListing, JobsEnvelope};
pub use lead::{
    CareLead, FormPayload, JobLead, LeadSubmission, LeadSubmitter, SubmitError, SubmitReceipt,
};
pub use router::intake_router;
pub use service::{IntakeService, JobBoard, WizardSubmissionRequest, WizardSubmissionResponse};
pub use step::{ChoiceOption, ConsentFlag, ContactField, Heading, StepDescriptor};
