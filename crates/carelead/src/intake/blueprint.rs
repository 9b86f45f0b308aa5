use serde::{Deserialize, Serialize};

use super::answers::Answers;
use super::controller::WizardError;
use super::fields::{is_present, FieldKind};
use super::lead::{CareLead, JobLead, LeadSubmission};
use super::step::{ChoiceOption, ConsentFlag, ContactField, Heading, StepDescriptor};
use crate::config::IntakeConfig;

/// Every lead wizard the site offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardKind {
    InHomeCare,
    CompanionCare,
    AdultCompanionCare,
    FamilyCaregiver,
    JobApplication,
}

impl WizardKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::InHomeCare,
            Self::CompanionCare,
            Self::AdultCompanionCare,
            Self::FamilyCaregiver,
            Self::JobApplication,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::InHomeCare => "in_home_care",
            Self::CompanionCare => "companion_care",
            Self::AdultCompanionCare => "adult_companion_care",
            Self::FamilyCaregiver => "family_caregiver",
            Self::JobApplication => "job_application",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InHomeCare => "In-Home Care",
            Self::CompanionCare => "Companion Care",
            Self::AdultCompanionCare => "Adult Companion Care",
            Self::FamilyCaregiver => "Family Caregiver Eligibility",
            Self::JobApplication => "Job Application",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug() == wanted)
    }

    pub const fn is_care(self) -> bool {
        !matches!(self, Self::JobApplication)
    }
}

/// What the host does once the success message has been shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "url", rename_all = "snake_case")]
pub enum CompletionAction {
    CloseHost,
    Redirect(String),
}

/// Declarative description of one wizard.
#[derive(Debug, Clone, Serialize)]
pub struct WizardBlueprint {
    kind: WizardKind,
    title: &'static str,
    steps: &'static [StepDescriptor],
    completion: CompletionAction,
}

impl WizardBlueprint {
    pub fn for_kind(kind: WizardKind, config: &IntakeConfig) -> Self {
        let (title, steps) = match kind {
            WizardKind::InHomeCare => ("Let's find the right in-home care", IN_HOME_CARE_STEPS),
            WizardKind::CompanionCare => ("Companionship tailored to you", COMPANION_CARE_STEPS),
            WizardKind::AdultCompanionCare => (
                "Adult companion care that fits your week",
                ADULT_COMPANION_CARE_STEPS,
            ),
            WizardKind::FamilyCaregiver => (
                "See if you can get paid to care for family",
                FAMILY_CAREGIVER_STEPS,
            ),
            WizardKind::JobApplication => ("Apply to join our care team", JOB_APPLICATION_STEPS),
        };

        let completion = if kind.is_care() {
            CompletionAction::CloseHost
        } else {
            CompletionAction::Redirect(config.confirmation_url.clone())
        };

        Self {
            kind,
            title,
            steps,
            completion,
        }
    }

    pub fn kind(&self) -> WizardKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn steps(&self) -> &'static [StepDescriptor] {
        self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Step at a 1-based position.
    pub fn step(&self, position: usize) -> Option<&'static StepDescriptor> {
        position
            .checked_sub(1)
            .and_then(|index| self.steps.get(index))
    }

    pub fn completion(&self) -> &CompletionAction {
        &self.completion
    }

    pub fn contact_field(&self, name: &str) -> Option<&'static ContactField> {
        self.steps.iter().find_map(|step| step.contact_field(name))
    }

    pub fn consent_flag(&self, name: &str) -> Option<ConsentFlag> {
        self.steps.iter().find_map(|step| match step {
            StepDescriptor::ContactForm {
                consent: Some(flag),
                ..
            } if flag.name == name => Some(*flag),
            _ => None,
        })
    }

    /// Builds the backend payload from accumulated answers.
    pub fn encode_lead(&self, answers: &Answers) -> Result<LeadSubmission, WizardError> {
        if !self.kind.is_care() {
            return Ok(LeadSubmission::Job(JobLead {
                job_id: optional_text(answers, "jobId"),
                first_name: required_text(answers, "firstName")?,
                last_name: required_text(answers, "lastName")?,
                mobile_number: required_text(answers, "mobileNumber")?,
                email: required_text(answers, "email")?,
                search_location: optional_text(answers, "searchLocation"),
                job_title: optional_text(answers, "jobTitle"),
            }));
        }

        let mut details = Vec::new();
        for step in self.steps {
            match *step {
                StepDescriptor::Choice { field, .. } if field != WHO_NEEDS_CARE => {
                    if let Some(value) = answers.text(field) {
                        details.push((field.to_string(), value.to_string()));
                    }
                }
                StepDescriptor::MultiChoice { field, .. } => {
                    details.extend(
                        answers
                            .selections(field)
                            .iter()
                            .map(|value| (field.to_string(), value.clone())),
                    );
                }
                _ => {}
            }
        }

        Ok(LeadSubmission::Care(CareLead {
            care_type: self.kind.slug().to_string(),
            who_needs_care: required_text(answers, WHO_NEEDS_CARE)?,
            first_name: required_text(answers, "firstName")?,
            last_name: required_text(answers, "lastName")?,
            phone: required_text(answers, "phone")?,
            email: required_text(answers, "email")?,
            postal_code: required_text(answers, "postalCode")?,
            sms_consent: answers.flag(SMS_CONSENT),
            details,
        }))
    }
}

fn required_text(answers: &Answers, field: &'static str) -> Result<String, WizardError> {
    answers
        .text(field)
        .filter(|value| is_present(value))
        .map(str::to_string)
        .ok_or(WizardError::MissingField(field))
}

fn optional_text(answers: &Answers, field: &str) -> String {
    answers.text(field).unwrap_or_default().to_string()
}

pub(crate) const WHO_NEEDS_CARE: &str = "whoNeedsCare";
const SMS_CONSENT: &str = "smsConsent";

const WHO_NEEDS_CARE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption {
        value: "parent_loved_one",
        label: "A parent or loved one",
    },
    ChoiceOption {
        value: "me",
        label: "Me",
    },
];

const CONTACT_HEADING: Heading = Heading::ByAnswer {
    field: WHO_NEEDS_CARE,
    cases: &[("me", "Where can we reach you?")],
    fallback: "Where can we reach you about your loved one?",
};

const CARE_CONTACT_FIELDS: &[ContactField] = &[
    ContactField {
        name: "firstName",
        label: "First name",
        kind: FieldKind::Text,
        required: true,
    },
    ContactField {
        name: "lastName",
        label: "Last name",
        kind: FieldKind::Text,
        required: true,
    },
    ContactField {
        name: "phone",
        label: "Phone",
        kind: FieldKind::Phone,
        required: true,
    },
    ContactField {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        required: true,
    },
    ContactField {
        name: "postalCode",
        label: "Postal code",
        kind: FieldKind::PostalCode,
        required: true,
    },
];

const SMS_CONSENT_FLAG: ConsentFlag = ConsentFlag {
    name: SMS_CONSENT,
    label: "I agree to receive text messages about my care inquiry.",
};

const CARE_CONTACT_STEP: StepDescriptor = StepDescriptor::ContactForm {
    heading: CONTACT_HEADING,
    fields: CARE_CONTACT_FIELDS,
    consent: Some(SMS_CONSENT_FLAG),
};

const WHO_NEEDS_CARE_STEP: StepDescriptor = StepDescriptor::Choice {
    field: WHO_NEEDS_CARE,
    prompt: "Who needs care?",
    options: WHO_NEEDS_CARE_OPTIONS,
};

const IN_HOME_CARE_STEPS: &[StepDescriptor] = &[
    WHO_NEEDS_CARE_STEP,
    StepDescriptor::MultiChoice {
        field: "assistanceTypes",
        prompt: "What kind of assistance is needed?",
        options: &[
            ChoiceOption {
                value: "mobility_assistance",
                label: "Mobility assistance",
            },
            ChoiceOption {
                value: "everyday_tasks",
                label: "Everyday tasks",
            },
            ChoiceOption {
                value: "memory_care",
                label: "Memory care",
            },
            ChoiceOption {
                value: "other",
                label: "Something else",
            },
        ],
    },
    CARE_CONTACT_STEP,
];

const COMPANION_CARE_STEPS: &[StepDescriptor] = &[
    WHO_NEEDS_CARE_STEP,
    StepDescriptor::MultiChoice {
        field: "companionshipNeeds",
        prompt: "What would a companion help with?",
        options: &[
            ChoiceOption {
                value: "conversation",
                label: "Conversation and company",
            },
            ChoiceOption {
                value: "errands",
                label: "Errands and shopping",
            },
            ChoiceOption {
                value: "meal_preparation",
                label: "Meal preparation",
            },
            ChoiceOption {
                value: "light_housekeeping",
                label: "Light housekeeping",
            },
            ChoiceOption {
                value: "other",
                label: "Something else",
            },
        ],
    },
    CARE_CONTACT_STEP,
];

const ADULT_COMPANION_CARE_STEPS: &[StepDescriptor] = &[
    WHO_NEEDS_CARE_STEP,
    StepDescriptor::Choice {
        field: "visitFrequency",
        prompt: "How often would you like visits?",
        options: &[
            ChoiceOption {
                value: "daily",
                label: "Every day",
            },
            ChoiceOption {
                value: "few_times_week",
                label: "A few times a week",
            },
            ChoiceOption {
                value: "weekly",
                label: "Once a week",
            },
            ChoiceOption {
                value: "not_sure",
                label: "Not sure yet",
            },
        ],
    },
    StepDescriptor::MultiChoice {
        field: "supportTypes",
        prompt: "Which activities matter most?",
        options: &[
            ChoiceOption {
                value: "social_outings",
                label: "Social outings",
            },
            ChoiceOption {
                value: "appointments",
                label: "Getting to appointments",
            },
            ChoiceOption {
                value: "hobbies",
                label: "Hobbies and games",
            },
            ChoiceOption {
                value: "other",
                label: "Something else",
            },
        ],
    },
    CARE_CONTACT_STEP,
];

const FAMILY_CAREGIVER_STEPS: &[StepDescriptor] = &[
    WHO_NEEDS_CARE_STEP,
    StepDescriptor::Choice {
        field: "caregiverRelationship",
        prompt: "How are you related to the person who needs care?",
        options: &[
            ChoiceOption {
                value: "child",
                label: "I'm their son or daughter",
            },
            ChoiceOption {
                value: "spouse",
                label: "I'm their spouse",
            },
            ChoiceOption {
                value: "other_relative",
                label: "Another relative",
            },
            ChoiceOption {
                value: "self",
                label: "I need care myself",
            },
        ],
    },
    StepDescriptor::Choice {
        field: "medicaidStatus",
        prompt: "Does the person receiving care have Medicaid?",
        options: &[
            ChoiceOption {
                value: "yes",
                label: "Yes",
            },
            ChoiceOption {
                value: "no",
                label: "No",
            },
            ChoiceOption {
                value: "not_sure",
                label: "Not sure",
            },
        ],
    },
    CARE_CONTACT_STEP,
];

const JOB_APPLICATION_STEPS: &[StepDescriptor] = &[StepDescriptor::ContactForm {
    heading: Heading::Fixed {
        text: "Tell us how to reach you",
    },
    fields: &[
        ContactField {
            name: "firstName",
            label: "First name",
            kind: FieldKind::Text,
            required: true,
        },
        ContactField {
            name: "lastName",
            label: "Last name",
            kind: FieldKind::Text,
            required: true,
        },
        ContactField {
            name: "mobileNumber",
            label: "Mobile number",
            kind: FieldKind::Phone,
            required: true,
        },
        ContactField {
            name: "email",
            label: "Email",
            kind: FieldKind::Email,
            required: true,
        },
    ],
    consent: None,
}];
