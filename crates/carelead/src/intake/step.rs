use serde::Serialize;

use super::answers::Answers;
use super::fields::{is_present, FieldKind};

/// Selectable answer on a choice screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Input on a contact-details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Checkbox on a contact form, such as SMS consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsentFlag {
    pub name: &'static str,
    pub label: &'static str,
}

/// Contact form heading, optionally keyed off an earlier answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Heading {
    Fixed {
        text: &'static str,
    },
    ByAnswer {
        field: &'static str,
        cases: &'static [(&'static str, &'static str)],
        fallback: &'static str,
    },
}

impl Heading {
    pub fn resolve(&self, answers: &Answers) -> &'static str {
        match *self {
            Self::Fixed { text } => text,
            Self::ByAnswer {
                field,
                cases,
                fallback,
            } => answers
                .text(field)
                .and_then(|answer| {
                    cases
                        .iter()
                        .find(|(value, _)| *value == answer)
                        .map(|(_, text)| *text)
                })
                .unwrap_or(fallback),
        }
    }
}

/// One screen of a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepDescriptor {
    Choice {
        field: &'static str,
        prompt: &'static str,
        options: &'static [ChoiceOption],
    },
    MultiChoice {
        field: &'static str,
        prompt: &'static str,
        options: &'static [ChoiceOption],
    },
    ContactForm {
        heading: Heading,
        fields: &'static [ContactField],
        consent: Option<ConsentFlag>,
    },
}

impl StepDescriptor {
    /// Whether the step's Continue/Submit control is enabled.
    pub fn is_complete(&self, answers: &Answers) -> bool {
        match *self {
            Self::Choice { field, .. } => answers.text(field).is_some_and(is_present),
            Self::MultiChoice { field, .. } => !answers.selections(field).is_empty(),
            Self::ContactForm { fields, .. } => fields
                .iter()
                .filter(|contact| contact.required)
                .all(|contact| answers.text(contact.name).is_some_and(is_present)),
        }
    }

    pub fn option(&self, value: &str) -> Option<&'static ChoiceOption> {
        match *self {
            Self::Choice { options, .. } | Self::MultiChoice { options, .. } => {
                options.iter().find(|option| option.value == value)
            }
            Self::ContactForm { .. } => None,
        }
    }

    pub fn contact_field(&self, name: &str) -> Option<&'static ContactField> {
        match *self {
            Self::ContactForm { fields, .. } => fields.iter().find(|field| field.name == name),
            _ => None,
        }
    }

    pub const fn answer_field(&self) -> Option<&'static str> {
        match *self {
            Self::Choice { field, .. } | Self::MultiChoice { field, .. } => Some(field),
            Self::ContactForm { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[ChoiceOption] = &[
        ChoiceOption {
            value: "me",
            label: "Me",
        },
        ChoiceOption {
            value: "parent_loved_one",
            label: "A parent or loved one",
        },
    ];

    const FIELDS: &[ContactField] = &[
        ContactField {
            name: "firstName",
            label: "First name",
            kind: FieldKind::Text,
            required: true,
        },
        ContactField {
            name: "nickname",
            label: "Nickname",
            kind: FieldKind::Text,
            required: false,
        },
    ];

    #[test]
    fn contact_form_ignores_optional_fields() {
        let step = StepDescriptor::ContactForm {
            heading: Heading::Fixed { text: "Contact" },
            fields: FIELDS,
            consent: None,
        };
        let mut answers = Answers::new();
        assert!(!step.is_complete(&answers));
        answers.set_text("firstName", "  ");
        assert!(!step.is_complete(&answers));
        answers.set_text("firstName", "Ada");
        assert!(step.is_complete(&answers));
    }

    #[test]
    fn heading_follows_earlier_answer() {
        let heading = Heading::ByAnswer {
            field: "whoNeedsCare",
            cases: &[("me", "How can we reach you?")],
            fallback: "How can we reach you about your loved one?",
        };
        let mut answers = Answers::new();
        assert_eq!(
            heading.resolve(&answers),
            "How can we reach you about your loved one?"
        );
        answers.set_text("whoNeedsCare", "me");
        assert_eq!(heading.resolve(&answers), "How can we reach you?");
    }

    #[test]
    fn choice_lookup_is_scoped_to_options() {
        let step = StepDescriptor::Choice {
            field: "whoNeedsCare",
            prompt: "Who needs care?",
            options: OPTIONS,
        };
        assert!(step.option("me").is_some());
        assert!(step.option("neighbor").is_none());
        assert_eq!(step.answer_field(), Some("whoNeedsCare"));
    }
}
