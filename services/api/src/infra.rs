use carelead::admin::{
    ApplicationSource, ApplicationStatus, CareApplication, JobApplication, SourceError,
};
use carelead::chat::{ChatBackend, ChatError, ChatReply, ChatRequest};
use carelead::intake::{
    CareLead, JobBoard, JobLead, JobListing, LeadSubmission, LeadSubmitter, SubmitError,
    SubmitReceipt,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "Duplicate email";
pub(crate) const ACCEPTED_MESSAGE: &str =
    "Thank you! A care coordinator will reach out within one business day.";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct StoredLeads {
    jobs: Vec<JobApplication>,
    care: Vec<CareApplication>,
}

/// Stand-in for the lead backend: accepts wizard submissions and serves them back to the admin tabs.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadStore {
    leads: Arc<Mutex<StoredLeads>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryLeadStore {
    fn next_id(&self, prefix: &str) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{id}")
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoredLeads>, SourceError> {
        self.leads
            .lock()
            .map_err(|_| SourceError::Unavailable("lead store mutex poisoned".to_string()))
    }

    fn store_care(&self, lead: &CareLead, now: DateTime<Utc>) -> CareApplication {
        CareApplication {
            id: self.next_id("care"),
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            postal_code: lead.postal_code.clone(),
            care_category: Some(lead.care_type.clone()),
            service_type: None,
            who_needs_care: Some(lead.who_needs_care.clone()),
            sms_consent: lead.sms_consent,
            status: ApplicationStatus::Pending.as_str().to_string(),
            admin_notes: None,
            created_at: now,
        }
    }

    fn store_job(&self, lead: &JobLead, now: DateTime<Utc>) -> JobApplication {
        JobApplication {
            id: self.next_id("job"),
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            phone: lead.mobile_number.clone(),
            zip_code: String::new(),
            job_category: None,
            service_type: None,
            gender: None,
            has_experience: None,
            job_title: Some(lead.job_title.clone()),
            search_location: Some(lead.search_location.clone()),
            status: ApplicationStatus::Pending.as_str().to_string(),
            admin_notes: None,
            created_at: now,
        }
    }
}

impl LeadSubmitter for InMemoryLeadStore {
    fn submit(&self, lead: &LeadSubmission) -> Result<SubmitReceipt, SubmitError> {
        let mut guard = self
            .lock()
            .map_err(|err| SubmitError::Unreachable(err.to_string()))?;
        let email = lead.email().to_ascii_lowercase();
        let now = Utc::now();

        let duplicate = match lead {
            LeadSubmission::Care(_) => guard
                .care
                .iter()
                .any(|record| record.email.to_ascii_lowercase() == email),
            LeadSubmission::Job(_) => guard
                .jobs
                .iter()
                .any(|record| record.email.to_ascii_lowercase() == email),
        };
        if duplicate {
            return Ok(SubmitReceipt::rejected(DUPLICATE_EMAIL_MESSAGE));
        }

        match lead {
            LeadSubmission::Care(lead) => {
                let record = self.store_care(lead, now);
                info!(id = %record.id, endpoint = "/api/applications/client", "care lead stored");
                guard.care.push(record);
            }
            LeadSubmission::Job(lead) => {
                let record = self.store_job(lead, now);
                info!(id = %record.id, endpoint = "/api/applications/job", "job lead stored");
                guard.jobs.push(record);
            }
        }

        Ok(SubmitReceipt::accepted(ACCEPTED_MESSAGE))
    }
}

impl ApplicationSource<JobApplication> for InMemoryLeadStore {
    fn fetch(&self) -> Result<Vec<JobApplication>, SourceError> {
        Ok(self.lock()?.jobs.clone())
    }
}

impl ApplicationSource<CareApplication> for InMemoryLeadStore {
    fn fetch(&self) -> Result<Vec<CareApplication>, SourceError> {
        Ok(self.lock()?.care.clone())
    }
}

/// Fixed careers page listings.
#[derive(Clone)]
pub(crate) struct StaticJobBoard {
    listings: Vec<JobListing>,
}

impl StaticJobBoard {
    pub(crate) fn seeded() -> Self {
        let listing = |id: &str, title: &str, location: &str, category: &str| JobListing {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            category: Some(category.to_string()),
            service_type: Some("in_home_care".to_string()),
            summary: None,
        };

        Self {
            listings: vec![
                listing("psw-brampton", "Personal Support Worker", "Brampton", "caregiver"),
                listing("cc-mississauga", "Companion Caregiver", "Mississauga", "companion"),
                listing("rn-toronto", "Registered Nurse", "Toronto", "nursing"),
            ],
        }
    }
}

impl JobBoard for StaticJobBoard {
    fn listings(&self) -> Result<Vec<JobListing>, SourceError> {
        Ok(self.listings.clone())
    }
}

/// Keyword responder standing in for the chat assistant.
#[derive(Default)]
pub(crate) struct CannedChatBackend {
    threads: AtomicU64,
}

impl ChatBackend for CannedChatBackend {
    fn reply(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let thread_id = match &request.thread_id {
            Some(thread_id) => thread_id.clone(),
            None => format!("thread-{}", self.threads.fetch_add(1, Ordering::Relaxed) + 1),
        };

        let message = request.message.to_lowercase();
        let response = if message.contains("job") || message.contains("career") {
            "We're hiring caregivers across the region. Browse open roles on our careers page."
        } else if message.contains("cost") || message.contains("price") {
            "Pricing depends on the care plan. Share your details and a coordinator will follow up."
        } else {
            "Thanks for reaching out! Tell us a little about who needs care and how we can help."
        };

        Ok(ChatReply {
            response: response.to_string(),
            thread_id,
        })
    }
}
