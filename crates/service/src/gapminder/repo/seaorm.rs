use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::gapminder::domain::DataRecord;
use crate::gapminder::repository::GapminderRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmGapminderRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmGapminderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl GapminderRepository for SeaOrmGapminderRepository {
    async fn fetch_all(&self) -> Result<Vec<DataRecord>, ServiceError> {
        let rows = models::gapminder::find_all(&self.db).await?;
        Ok(rows.into_iter().map(DataRecord::from).collect())
    }
}
