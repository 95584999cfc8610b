use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("Unknown audit action: {0}")]
    UnknownAction(String),

    #[error("Unknown audit target type: {0}")]
    UnknownTargetType(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
