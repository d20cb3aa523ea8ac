use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::csv_table::CsvTable;
use super::domain::{Row, WIRE_FIELDS};
use super::repository::GapminderRepository;
use crate::errors::ServiceError;

/// Whatever backs `GET /api/gapminder`. All reads are side-effect free.
#[async_trait]
pub trait GapminderSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Every record, in source order. All-or-nothing: any bad row fails the call.
    async fn fetch_all(&self) -> Result<Vec<Row>, ServiceError>;
}

/// Reads the CSV file from disk on every call; nothing is cached.
#[derive(Debug, Clone)]
pub struct CsvGapminderSource {
    path: PathBuf,
}

impl CsvGapminderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wire fields absent from the file header. Rows are returned with the
    /// file's own column names, so a non-empty result means this source is not
    /// wire-compatible with the database one.
    pub async fn check_header(&self) -> Result<Vec<String>, ServiceError> {
        let table = CsvTable::read(&self.path).await?;
        let missing = table.missing_columns(&WIRE_FIELDS);
        if !missing.is_empty() {
            warn!(
                path = %self.path.display(),
                headers = ?table.headers(),
                missing = ?missing,
                "csv header differs from the wire field names; rows are served as-is"
            );
        }
        Ok(missing)
    }
}

#[async_trait]
impl GapminderSource for CsvGapminderSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn fetch_all(&self) -> Result<Vec<Row>, ServiceError> {
        let rows = CsvTable::read(&self.path).await?.into_rows();
        debug!(path = %self.path.display(), rows = rows.len(), "csv loaded");
        Ok(rows)
    }
}

/// Reads through a repository and renders each record in wire field order.
pub struct DatabaseGapminderSource<R> {
    repo: R,
}

impl<R: GapminderRepository> DatabaseGapminderSource<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: GapminderRepository> GapminderSource for DatabaseGapminderSource<R> {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn fetch_all(&self) -> Result<Vec<Row>, ServiceError> {
        let records = self.repo.fetch_all().await?;
        debug!(rows = records.len(), "gapminder_data scanned");
        Ok(records.into_iter().map(Row::from).collect())
    }
}
