use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Connection could not be opened or taken from the pool.
    #[error("database unavailable: {0}")]
    Unavailable(String),
    /// A stored value could not be decoded into the entity's field type.
    #[error("row decode failed: {0}")]
    Decode(String),
    #[error("database error: {0}")]
    Db(String),
}

/// sqlx reports a stored value of the wrong SQL type as a column decode failure.
fn is_sqlx_decode(err: &sea_orm::sqlx::Error) -> bool {
    matches!(err, sea_orm::sqlx::Error::ColumnDecode { .. } | sea_orm::sqlx::Error::Decode(_))
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Unavailable(err.to_string()),
            DbErr::Type(_) | DbErr::TryIntoErr { .. } | DbErr::Json(_) => Self::Decode(err.to_string()),
            DbErr::Query(RuntimeErr::SqlxError(e)) if is_sqlx_decode(e) => Self::Decode(err.to_string()),
            _ => Self::Db(err.to_string()),
        }
    }
}
