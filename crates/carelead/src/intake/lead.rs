use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters left untouched by `application/x-www-form-urlencoded`.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b' ');

/// Ordered key/value pairs sent as a form-encoded body. Keys may repeat, which is how
/// multi-select answers travel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormPayload {
    pairs: Vec<(String, String)>,
}

impl FormPayload {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// First value recorded for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, FORM_VALUE)
        .to_string()
        .replace(' ', "+")
}

/// Care lead accumulated by one of the care wizards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareLead {
    pub care_type: String,
    pub who_needs_care: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub postal_code: String,
    pub sms_consent: bool,
    /// Remaining choice and multi-select answers, in step order.
    #[serde(default)]
    pub details: Vec<(String, String)>,
}

/// Job application accumulated by the job wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobLead {
    pub job_id: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    pub search_location: String,
    pub job_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadSubmission {
    Care(CareLead),
    Job(JobLead),
}

impl LeadSubmission {
    pub fn email(&self) -> &str {
        match self {
            Self::Care(lead) => &lead.email,
            Self::Job(lead) => &lead.email,
        }
    }

    /// Backend route that receives this lead.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Care(_) => "/api/applications/client",
            Self::Job(_) => "/api/applications/job",
        }
    }

    pub fn form_payload(&self) -> FormPayload {
        let mut form = FormPayload::default();
        match self {
            Self::Care(lead) => {
                form.push("careType", &lead.care_type);
                form.push("whoNeedsCare", &lead.who_needs_care);
                form.push("firstName", &lead.first_name);
                form.push("lastName", &lead.last_name);
                form.push("phone", &lead.phone);
                form.push("email", &lead.email);
                form.push("postalCode", &lead.postal_code);
                form.push("smsConsent", lead.sms_consent.to_string());
                for (key, value) in &lead.details {
                    form.push(key, value);
                }
            }
            Self::Job(lead) => {
                form.push("jobId", &lead.job_id);
                form.push("firstName", &lead.first_name);
                form.push("lastName", &lead.last_name);
                form.push("mobileNumber", &lead.mobile_number);
                form.push("email", &lead.email);
                form.push("searchLocation", &lead.search_location);
                form.push("jobTitle", &lead.job_title);
            }
        }
        form
    }
}

/// Backend reply to a lead submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl SubmitReceipt {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Outbound seam to whatever stores submitted leads.
pub trait LeadSubmitter: Send + Sync {
    fn submit(&self, lead: &LeadSubmission) -> Result<SubmitReceipt, SubmitError>;
}

/// Transport-level submission failure.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("lead endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("lead endpoint returned an unreadable response: {0}")]
    InvalidResponse(String),
}
