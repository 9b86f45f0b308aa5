use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::export::{short_date, yes_no};
use crate::intake::fields::full_name;

/// Review status shared by job and care applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Contacted,
    Hired,
    Rejected,
    Scheduled,
    Completed,
    Cancelled,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Pending,
            Self::Reviewed,
            Self::Contacted,
            Self::Hired,
            Self::Rejected,
            Self::Scheduled,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    /// Raw value as stored by the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Contacted => "contacted",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Contacted => "Contacted",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == wanted)
    }
}

/// Which admin tab a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordVariant {
    Job,
    Care,
}

impl RecordVariant {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Care => "care",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "job" | "jobs" => Some(Self::Job),
            "care" | "client" | "clients" => Some(Self::Care),
            _ => None,
        }
    }
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read-only view the admin browser needs from any stored application.
pub trait AdminRecord {
    const VARIANT: RecordVariant;

    fn id(&self) -> &str;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn email(&self) -> &str;
    fn phone(&self) -> &str;
    /// Raw status as stored; values outside [`ApplicationStatus`] are kept verbatim.
    fn status(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;

    fn full_name(&self) -> String {
        full_name(self.first_name(), self.last_name())
    }

    fn known_status(&self) -> Option<ApplicationStatus> {
        ApplicationStatus::parse(self.status())
    }

    /// Display label, falling back to the raw value for unknown statuses.
    fn status_label(&self) -> String {
        self.known_status()
            .map(|status| status.label().to_string())
            .unwrap_or_else(|| self.status().to_string())
    }

    fn csv_header() -> &'static [&'static str];
    fn csv_row(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub zip_code: String,
    #[serde(default)]
    pub job_category: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub has_experience: Option<bool>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub search_location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

const JOB_CSV_HEADER: &[&str] = &[
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Zip Code",
    "Job Category",
    "Service Type",
    "Gender",
    "Has Experience",
    "Job Title",
    "Search Location",
    "Status",
    "Admin Notes",
    "Created At",
];

impl AdminRecord for JobApplication {
    const VARIANT: RecordVariant = RecordVariant::Job;

    fn id(&self) -> &str {
        &self.id
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn phone(&self) -> &str {
        &self.phone
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn csv_header() -> &'static [&'static str] {
        JOB_CSV_HEADER
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.zip_code.clone(),
            self.job_category.clone().unwrap_or_default(),
            self.service_type.clone().unwrap_or_default(),
            self.gender.clone().unwrap_or_default(),
            yes_no(self.has_experience.unwrap_or(false)).to_string(),
            self.job_title.clone().unwrap_or_default(),
            self.search_location.clone().unwrap_or_default(),
            self.status.clone(),
            self.admin_notes.clone().unwrap_or_default(),
            short_date(self.created_at),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareApplication {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub postal_code: String,
    #[serde(default)]
    pub care_category: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub who_needs_care: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sms_consent: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

const CARE_CSV_HEADER: &[&str] = &[
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Postal Code",
    "Care Category",
    "Service Type",
    "Who Needs Care",
    "SMS Consent",
    "Status",
    "Admin Notes",
    "Created At",
];

impl AdminRecord for CareApplication {
    const VARIANT: RecordVariant = RecordVariant::Care;

    fn id(&self) -> &str {
        &self.id
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn phone(&self) -> &str {
        &self.phone
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn csv_header() -> &'static [&'static str] {
        CARE_CSV_HEADER
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.postal_code.clone(),
            self.care_category.clone().unwrap_or_default(),
            self.service_type.clone().unwrap_or_default(),
            self.who_needs_care.clone().unwrap_or_default(),
            yes_no(self.sms_consent).to_string(),
            self.status.clone(),
            self.admin_notes.clone().unwrap_or_default(),
            short_date(self.created_at),
        ]
    }
}
