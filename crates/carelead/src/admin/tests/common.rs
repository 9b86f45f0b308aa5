use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::admin::{
    ApplicationSource, ApplicationStatus, CareApplication, JobApplication, SourceError,
};

/// Fixed "now" so date filters are deterministic.
pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn job(
    id: usize,
    first: &str,
    last: &str,
    status: ApplicationStatus,
    age: Duration,
) -> JobApplication {
    JobApplication {
        id: format!("job-{id}"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        phone: format!("(555) 000-{id:04}"),
        zip_code: "L5B 1A1".to_string(),
        job_category: Some("caregiver".to_string()),
        service_type: None,
        gender: None,
        has_experience: None,
        job_title: Some("Personal Support Worker".to_string()),
        search_location: Some("Brampton".to_string()),
        status: status.as_str().to_string(),
        admin_notes: None,
        created_at: now() - age,
    }
}

pub(super) fn care(id: usize, first: &str, last: &str, age: Duration) -> CareApplication {
    CareApplication {
        id: format!("care-{id}"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: "(555) 123-4567".to_string(),
        postal_code: "12345".to_string(),
        care_category: Some("in_home_care".to_string()),
        service_type: None,
        who_needs_care: Some("me".to_string()),
        sms_consent: false,
        status: ApplicationStatus::Pending.as_str().to_string(),
        admin_notes: None,
        created_at: now() - age,
    }
}

/// 25 job applications, one created per hour (`job-0` newest). The 12 pending ones are the
/// even indexes below 24, interleaved with reviewed ones.
pub(super) fn job_pool() -> Vec<JobApplication> {
    (0..25)
        .map(|index| {
            let status = if index % 2 == 0 && index < 24 {
                ApplicationStatus::Pending
            } else {
                ApplicationStatus::Reviewed
            };
            job(
                index,
                "Applicant",
                &format!("Number{index:02}"),
                status,
                Duration::hours(index as i64),
            )
        })
        .collect()
}

pub(super) struct StaticSource<R> {
    pub(super) records: Vec<R>,
}

impl<R: Clone + Send + Sync> ApplicationSource<R> for StaticSource<R> {
    fn fetch(&self) -> Result<Vec<R>, SourceError> {
        Ok(self.records.clone())
    }
}

pub(super) struct FailingSource;

impl<R> ApplicationSource<R> for FailingSource {
    fn fetch(&self) -> Result<Vec<R>, SourceError> {
        Err(SourceError::Unavailable("connection reset".to_string()))
    }
}
