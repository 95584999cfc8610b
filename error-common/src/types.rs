use thiserror::Error;

/// Simplified error enum for binaries and start-up code
#[derive(Error, Debug)]
pub enum SgcError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server start-up and runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// External service errors
    #[error("External service error: {0}")]
    ExternalError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SgcError {
    /// Structured code for this error category
    pub fn code(&self) -> &'static str {
        match self {
            SgcError::NetworkError(_) | SgcError::ExternalError(_) => {
                crate::codes::upstream::FLOW_FAILED
            }
            SgcError::DatabaseError(_) => crate::codes::database::QUERY_FAILED,
            SgcError::ValidationError(_) => crate::codes::validation::INVALID_INPUT,
            SgcError::ConfigError(_) => crate::codes::system::CONFIGURATION,
            SgcError::ServerError(_) | SgcError::InternalError(_) | SgcError::Other(_) => {
                crate::codes::system::INTERNAL
            }
        }
    }
}

/// Result type alias for SGC_USB operations
pub type Result<T> = std::result::Result<T, SgcError>;

/// Log an error with its structured code
pub fn log_error(context: &str, error: &SgcError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "SGC_USB error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_by_category() {
        assert_eq!(
            SgcError::ValidationError("x".into()).code(),
            "VALIDATION_1001"
        );
        assert_eq!(SgcError::ExternalError("x".into()).code(), "UPSTREAM_5001");
        assert_eq!(SgcError::ConfigError("x".into()).code(), "SYSTEM_9002");
    }

    #[test]
    fn test_anyhow_conversion_is_transparent() {
        let err: SgcError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.code(), "SYSTEM_9001");
    }
}
