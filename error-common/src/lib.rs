//! Common error handling utilities for the SGC_USB backend
//!
//! This crate provides the error type shared by the binaries of the workspace
//! and the structured error codes that the HTTP API places in every error
//! body. Library crates keep their own `thiserror` enums; the server maps
//! them onto these codes.
//!
//! # Error Categories
//!
//! - **Validation**: malformed input, unknown filter values
//! - **Resource**: missing or conflicting records
//! - **Upstream**: failures of the external flow service
//! - **Database**: connection and query errors from the seeding path
//! - **System**: configuration and server start-up errors
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, SgcError};
//!
//! fn parse_port(raw: &str) -> error_common::Result<u16> {
//!     raw.parse()
//!         .map_err(|_| SgcError::ConfigError(format!("invalid port: {raw}")))
//! }
//!
//! assert!(parse_port("8080").is_ok());
//! assert_eq!(codes::validation::INVALID_INPUT, "VALIDATION_1001");
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
