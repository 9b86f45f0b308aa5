use std::io::Read;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Where the admin browser fetches its records from.
pub trait ApplicationSource<R>: Send + Sync {
    fn fetch(&self) -> Result<Vec<R>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),
    #[error("record source returned malformed data: {0}")]
    Malformed(String),
    #[error("record source reported failure")]
    Rejected,
}

/// `GET /api/applications/*` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationsEnvelope<R> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub applications: Vec<R>,
}

impl<R> ApplicationsEnvelope<R> {
    pub fn into_records(self) -> Result<Vec<R>, SourceError> {
        if self.success {
            Ok(self.applications)
        } else {
            Err(SourceError::Rejected)
        }
    }
}

/// Reads an envelope from JSON, e.g. a saved API response.
pub fn read_envelope<R, T>(reader: T) -> Result<Vec<R>, SourceError>
where
    R: DeserializeOwned,
    T: Read,
{
    let envelope: ApplicationsEnvelope<R> = serde_json::from_reader(reader)
        .map_err(|err| SourceError::Malformed(err.to_string()))?;
    envelope.into_records()
}
