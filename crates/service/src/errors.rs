use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Backing file missing or unreadable, or the database/table cannot be reached.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    /// A row could not be parsed or decoded. The whole request fails.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl ServiceError {
    /// Stable identifier used in error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::SourceUnavailable(_) => "source_unavailable",
            ServiceError::MalformedRecord(_) => "malformed_record",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Decode(msg) => ServiceError::MalformedRecord(msg),
            ModelError::Unavailable(msg) | ModelError::Db(msg) => ServiceError::SourceUnavailable(msg),
        }
    }
}
