// In-memory audit trail, newest entry first
use crate::entry::{log_id, AuditAction, AuditLog, TargetType};
use crate::query::{AuditLogPage, AuditLogQuery};
use chrono::Utc;
use parking_lot::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct TrailState {
    logs: Vec<AuditLog>,
    next_id: u64,
}

/// Shared audit trail
///
/// Readers take a read lock for the duration of one query; [`AuditTrail::record`]
/// inserts at the front so the trail stays reverse-chronological.
#[derive(Debug, Default)]
pub struct AuditTrail {
    state: RwLock<TrailState>,
}

impl AuditTrail {
    /// Wrap an existing history, which is expected newest first
    pub fn new(logs: Vec<AuditLog>) -> Self {
        let next_id = logs
            .iter()
            .filter_map(|log| log.id.strip_prefix("log-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: RwLock::new(TrailState { logs, next_id }),
        }
    }

    /// Append a new entry stamped with the current time
    pub fn record(
        &self,
        user: &str,
        action: AuditAction,
        target_type: TargetType,
        target_id: &str,
    ) -> AuditLog {
        let mut state = self.state.write();
        let id = state.next_id.max(1);
        state.next_id = id + 1;

        let log = AuditLog::new(log_id(id), user, action, target_type, target_id, Utc::now());
        state.logs.insert(0, log.clone());

        info!(
            audit_id = %log.id,
            action = %action,
            target_type = %target_type,
            target_id = target_id,
            "Audit entry recorded"
        );
        log
    }

    pub fn query(&self, query: &AuditLogQuery) -> AuditLogPage {
        query.execute(&self.state.read().logs)
    }

    /// The `limit` most recent entries
    pub fn recent(&self, limit: usize) -> Vec<AuditLog> {
        self.state.read().logs.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
