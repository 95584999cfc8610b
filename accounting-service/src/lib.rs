//! Expense management for the SGC_USB cost dashboard
//!
//! Provides the accounting side of the dashboard:
//! - Reference catalog of sedes (campuses), departments and expense categories
//! - Expense records with a draft / pending / approved / rejected lifecycle
//! - The approvals queue and its approve / reject transitions
//! - Dashboard totals, per-category breakdowns and report filtering
//! - CSV export of a report selection
//! - A generator that seeds the ledger with plausible history

pub mod catalog;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod models;
pub mod reporting;

pub use catalog::*;
pub use error::*;
pub use generator::*;
pub use ledger::*;
pub use models::*;
pub use reporting::*;
