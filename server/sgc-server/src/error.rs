use accounting_service::AccountingError;
use audit_engine::AuditError;
use auth_identity::IdentityError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use genai_service::GenAiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned when a flow call fails without a more specific context
pub const FLOW_FAILED_MESSAGE: &str = "Flow service request failed.";

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type
    pub error_type: String,
    /// Stable machine-readable code from `error_common::codes`
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-specific validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<HashMap<String, Vec<String>>>,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Suggested actions for resolving the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Standard API success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
}

/// Response metadata for pagination
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: Option<HashMap<String, Vec<String>>>,
    },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    #[error("Resource not found: {resource_type}")]
    NotFound { resource_type: String },

    #[error("Resource conflict: {message}")]
    Conflict { message: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// Remote flow failure; the message is safe to show to the caller
    #[error("{message}")]
    Upstream { message: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a validation error with field-specific errors
    pub fn validation_with_fields(
        message: impl Into<String>,
        field_errors: HashMap<String, Vec<String>>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: Some(field_errors),
        }
    }

    /// Create a simple validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Map a flow failure, replacing remote details with `public_message`
    ///
    /// Input errors stay validation errors since they never left the process.
    pub fn flow(error: GenAiError, public_message: &str) -> Self {
        match error {
            GenAiError::InvalidInput(message) => Self::validation(message),
            other => {
                warn!(error = %other, "Flow call failed");
                Self::upstream(public_message)
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. }
            | ApiError::InvalidFilter { .. }
            | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } | ApiError::InvalidState { .. } => StatusCode::CONFLICT,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } | ApiError::InvalidFilter { .. } => "validation_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } | ApiError::InvalidState { .. } => "conflict",
            ApiError::Upstream { .. } => "upstream_error",
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => codes::validation::INVALID_INPUT,
            ApiError::InvalidFilter { .. } => codes::validation::UNKNOWN_FILTER_VALUE,
            ApiError::NotFound { .. } => codes::resource::NOT_FOUND,
            ApiError::Conflict { .. } => codes::resource::CONFLICT,
            ApiError::InvalidState { .. } => codes::resource::INVALID_STATE,
            ApiError::Upstream { .. } => codes::upstream::FLOW_FAILED,
            ApiError::BadRequest { .. } => codes::validation::INVALID_FORMAT,
            ApiError::Internal { .. } => codes::system::INTERNAL,
        }
    }

    /// Get suggested actions for resolving the error
    pub fn suggestions(&self) -> Option<Vec<String>> {
        match self {
            ApiError::Validation { .. } => Some(vec![
                "Check the request payload for invalid fields".to_string(),
                "Ensure all required fields are provided".to_string(),
            ]),
            ApiError::InvalidFilter { .. } => Some(vec![
                "Separate multiple filter values with '.'".to_string(),
                "Use only the documented enum values".to_string(),
            ]),
            ApiError::NotFound { .. } => Some(vec![
                "Verify the resource ID is correct".to_string(),
            ]),
            ApiError::InvalidState { .. } => Some(vec![
                "Only pending expenses can be approved or rejected".to_string(),
            ]),
            ApiError::Upstream { .. } => Some(vec![
                "Try again in a few moments".to_string(),
                "Check the system status endpoint".to_string(),
            ]),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID; messages can echo user input
        error!(
            error_id = %error_id,
            error_type = %self.error_type(),
            code = %self.code(),
            status_code = %status_code.as_u16(),
            error = %logger_redacted::redact(&self.to_string()),
            "API error occurred"
        );

        let field_errors = match &self {
            ApiError::Validation { field_errors, .. } => field_errors.clone(),
            _ => None,
        };

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            code: self.code().to_string(),
            message: self.to_string(),
            field_errors,
            timestamp: chrono::Utc::now(),
            suggestions: self.suggestions(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Helper function to create successful API responses
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
        metadata: None,
    }
}

/// Helper function to create successful API responses with metadata
pub fn api_success_with_meta<T>(data: T, metadata: ResponseMetadata) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
        metadata: Some(metadata),
    }
}

impl From<AccountingError> for ApiError {
    fn from(error: AccountingError) -> Self {
        match error {
            AccountingError::Validation(message) => ApiError::validation(message),
            AccountingError::ExpenseNotFound(id) => ApiError::not_found(format!("Expense {id}")),
            e @ (AccountingError::UnknownCategory(_) | AccountingError::EmptySelection) => {
                ApiError::validation(e.to_string())
            }
            e @ AccountingError::UnknownStatus(_) => ApiError::invalid_filter(e.to_string()),
            e @ AccountingError::InvalidTransition { .. } => ApiError::InvalidState {
                message: e.to_string(),
            },
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::UserNotFound(id) => ApiError::not_found(format!("User {id}")),
            e @ IdentityError::EmailAlreadyInUse => ApiError::conflict(e.to_string()),
            e @ IdentityError::InvalidEmail => ApiError::validation_with_fields(
                e.to_string(),
                HashMap::from([("email".to_string(), vec![e.to_string()])]),
            ),
            IdentityError::Validation(message) => ApiError::validation(message),
            e @ (IdentityError::UnknownRole(_) | IdentityError::UnknownStatus(_)) => {
                ApiError::invalid_filter(e.to_string())
            }
        }
    }
}

impl From<AuditError> for ApiError {
    fn from(error: AuditError) -> Self {
        match error {
            e @ (AuditError::UnknownAction(_) | AuditError::UnknownTargetType(_)) => {
                ApiError::invalid_filter(e.to_string())
            }
            e @ AuditError::InvalidDate(_) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<GenAiError> for ApiError {
    fn from(error: GenAiError) -> Self {
        ApiError::flow(error, FLOW_FAILED_MESSAGE)
    }
}

/// Convert anyhow errors to API errors
impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal {
            message: error.to_string(),
        }
    }
}

/// Convert serde JSON errors to API errors
impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid JSON: {error}"),
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
