use error_common::SgcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

impl From<DatabaseError> for SgcError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InternalError(e) => SgcError::Other(e),
            other => SgcError::DatabaseError(other.to_string()),
        }
    }
}
