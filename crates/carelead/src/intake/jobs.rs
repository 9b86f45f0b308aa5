use serde::{Deserialize, Serialize};

/// Open position advertised on the careers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// `GET /api/jobs` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub jobs: Vec<JobListing>,
}

impl JobsEnvelope {
    /// Listings from a successful response; an unsuccessful one yields nothing.
    pub fn into_listings(self) -> Vec<JobListing> {
        if self.success {
            self.jobs
        } else {
            Vec::new()
        }
    }
}

/// Host-provided answers the job wizard starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobContext {
    pub job_id: String,
    pub job_title: String,
    pub search_location: String,
}

impl JobContext {
    /// Applying from a listing, optionally remembering where the visitor searched.
    pub fn from_listing(listing: &JobListing, search_location: Option<&str>) -> Self {
        let search_location = search_location
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(listing.location.as_str());

        Self {
            job_id: listing.id.clone(),
            job_title: listing.title.clone(),
            search_location: search_location.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> JobListing {
        JobListing {
            id: "job-7".to_string(),
            title: "Personal Support Worker".to_string(),
            location: "Mississauga".to_string(),
            category: Some("caregiver".to_string()),
            service_type: None,
            summary: None,
        }
    }

    #[test]
    fn failed_envelope_yields_no_listings() {
        let envelope: JobsEnvelope =
            serde_json::from_str(r#"{"success": false}"#).expect("envelope parses");
        assert!(envelope.into_listings().is_empty());
    }

    #[test]
    fn context_prefers_search_location_when_given() {
        let context = JobContext::from_listing(&listing(), Some(" Oakville "));
        assert_eq!(context.search_location, "Oakville");
        let fallback = JobContext::from_listing(&listing(), Some(""));
        assert_eq!(fallback.search_location, "Mississauga");
        assert_eq!(fallback.job_id, "job-7");
    }
}
