use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid user data: {0}")]
    Validation(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown user status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
