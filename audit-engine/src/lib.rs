//! Audit logging for the SGC_USB backend
//!
//! This crate owns everything about the audit trail:
//! - The [`AuditLog`] record and its closed action and target vocabularies
//! - A generator that fills the trail with plausible history on start-up
//! - [`AuditTrail`], the newest-first in-memory store that API handlers append to
//! - [`AuditLogQuery`], the filter-then-paginate query behind the audit-log table
//!
//! # Query semantics
//!
//! Filters are combined with AND. The user filter is a case-insensitive
//! substring match, the action and target-type filters are set membership
//! (an absent set filters nothing, unknown names match nothing) and the date
//! range is inclusive at both
//! ends. Matching records keep the order of the trail. The page is sliced
//! after filtering, so `total_count` never depends on the page requested and
//! a page past the end is simply empty.
//!
//! # Example
//!
//! ```rust
//! use audit_engine::{AuditAction, AuditLogQuery, AuditTrail, TargetType};
//!
//! let trail = AuditTrail::default();
//! trail.record("Maria Garcia", AuditAction::Create, TargetType::Expense, "EXP-001");
//! trail.record("Juan Pérez", AuditAction::Login, TargetType::System, "sys-001");
//!
//! let query = AuditLogQuery {
//!     user: Some("maria".to_string()),
//!     ..AuditLogQuery::default()
//! };
//! let page = trail.query(&query);
//! assert_eq!(page.total_count, 1);
//! assert_eq!(page.data[0].target_id, "EXP-001");
//! ```

pub mod entry;
pub mod error;
pub mod generator;
pub mod query;
pub mod trail;

pub use entry::*;
pub use error::*;
pub use generator::*;
pub use query::*;
pub use trail::*;
