//! User directory for the SGC_USB backend
//!
//! This module provides the account administration behind the users page:
//! - User, role and status models
//! - A repository seam with an in-memory implementation seeded with the
//!   reference accounts
//! - Directory operations: filtered listing, create, update and delete with
//!   e-mail uniqueness and field validation
//!
//! # Example
//!
//! ```rust
//! use auth_identity::{UserDirectory, UserFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = UserDirectory::with_reference_users();
//!
//!     let filter = UserFilter {
//!         q: Some("garcia".to_string()),
//!         ..UserFilter::default()
//!     };
//!     let users = directory.list(&filter).await?;
//!     assert_eq!(users[0].id, "usr-002");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
