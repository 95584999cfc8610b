//! PostgreSQL persistence for the SGC_USB backend
//!
//! The running server keeps its working set in memory; this crate provides
//! the relational copy of the reference data:
//! - Connection pooling with health checks
//! - An idempotent schema for sedes, departments, categories, users,
//!   expenses and audit logs
//! - Seeding of the reference data (see the `seed` binary)

pub mod connection;
pub mod error;
pub mod schema;
pub mod seed;

pub use connection::*;
pub use error::*;
pub use schema::*;
pub use seed::*;
