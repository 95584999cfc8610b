//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait and helper macros to
//! centralize validation logic and ensure consistent error messages. The
//! domain crates repeat the business checks; these run first so that a bad
//! payload is rejected before any state is touched.

use crate::error::ApiError;
use accounting_service::{NewExpense, MIN_DESCRIPTION_LEN};
use auth_identity::{CreateUserRequest, UpdateUserRequest, MAX_NAME_LEN, MIN_NAME_LEN};
use rust_decimal::Decimal;

/// Trait for validating request payloads
pub trait RequestValidation {
    /// Returns `Ok(())` if validation passes, or a validation `ApiError`
    ///
    /// # Errors
    /// The first failed check.
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```rust,ignore
/// validate_field!(self.amount, self.amount > Decimal::ZERO, "Amount must be positive");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-empty strings)
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating string length in characters, after trimming
#[macro_export]
macro_rules! validate_length {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        let len = $field.trim().chars().count();
        $crate::validate_field!($field, len >= $min && len <= $max, $message);
    };
}

/// Macro for validating email format (basic check)
#[macro_export]
macro_rules! validate_email {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, $field.contains('@') && $field.contains('.'), $message);
    };
}

impl RequestValidation for NewExpense {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.description, "Description is required");
        validate_field!(
            self.description,
            self.description.trim().chars().count() >= MIN_DESCRIPTION_LEN,
            format!("Description must be at least {MIN_DESCRIPTION_LEN} characters")
        );
        validate_field!(
            self.amount,
            self.amount.round_dp(2) > Decimal::ZERO,
            "Amount must be at least 0.01"
        );
        validate_required!(self.category, "Category is required");
        Ok(())
    }
}

impl RequestValidation for CreateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.name, "Name is required");
        validate_length!(
            self.name,
            MIN_NAME_LEN,
            MAX_NAME_LEN,
            format!("Name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters")
        );
        validate_required!(self.email, "Email is required");
        validate_email!(self.email, "Invalid email format");
        Ok(())
    }
}

impl RequestValidation for UpdateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            validate_length!(
                name,
                MIN_NAME_LEN,
                MAX_NAME_LEN,
                format!("Name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters")
            );
        }
        if let Some(email) = &self.email {
            validate_email!(email, "Invalid email format");
        }
        Ok(())
    }
}
