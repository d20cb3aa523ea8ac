use async_trait::async_trait;

use super::domain::DataRecord;
use crate::errors::ServiceError;

/// Read access to the persisted gapminder table.
#[async_trait]
pub trait GapminderRepository: Send + Sync {
    /// Every stored row, renamed to the wire shape, in storage order.
    async fn fetch_all(&self) -> Result<Vec<DataRecord>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;

    #[derive(Default)]
    pub struct MockGapminderRepository {
        records: Vec<DataRecord>,
        fail_with: Option<String>,
    }

    impl MockGapminderRepository {
        pub fn new(records: Vec<DataRecord>) -> Self {
            Self { records, fail_with: None }
        }

        /// A repository whose every read fails as if the database were down.
        pub fn unavailable(reason: impl Into<String>) -> Self {
            Self { records: Vec::new(), fail_with: Some(reason.into()) }
        }
    }

    #[async_trait]
    impl GapminderRepository for MockGapminderRepository {
        async fn fetch_all(&self) -> Result<Vec<DataRecord>, ServiceError> {
            match &self.fail_with {
                Some(reason) => Err(ServiceError::SourceUnavailable(reason.clone())),
                None => Ok(self.records.clone()),
            }
        }
    }
}
