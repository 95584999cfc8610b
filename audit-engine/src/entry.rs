// Audit log record and its vocabularies
use crate::error::AuditError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Action recorded by an audit log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    ApproveReport,
    GenerateReport,
}

impl AuditAction {
    /// Rotation order used by the history generator
    pub const ALL: [AuditAction; 7] = [
        AuditAction::Create,
        AuditAction::Update,
        AuditAction::Delete,
        AuditAction::Login,
        AuditAction::Logout,
        AuditAction::ApproveReport,
        AuditAction::GenerateReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::ApproveReport => "approve_report",
            AuditAction::GenerateReport => "generate_report",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| AuditError::UnknownAction(s.to_string()))
    }
}

/// Kind of entity an audit log entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Expense,
    User,
    Report,
    System,
    Optimisation,
}

impl TargetType {
    /// Rotation order used by the history generator
    pub const ALL: [TargetType; 5] = [
        TargetType::Expense,
        TargetType::User,
        TargetType::Report,
        TargetType::System,
        TargetType::Optimisation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Expense => "expense",
            TargetType::User => "user",
            TargetType::Report => "report",
            TargetType::System => "system",
            TargetType::Optimisation => "optimisation",
        }
    }

    /// Three-letter prefix used in generated target ids (`exp-042`)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            TargetType::Expense => "exp",
            TargetType::User => "use",
            TargetType::Report => "rep",
            TargetType::System => "sys",
            TargetType::Optimisation => "opt",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetType::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| AuditError::UnknownTargetType(s.to_string()))
    }
}

/// A single audit trail record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[schema(example = "log-0042")]
    pub id: String,
    /// Display name of the acting user
    #[schema(example = "Maria Garcia")]
    pub user: String,
    pub action: AuditAction,
    pub target_type: TargetType,
    #[schema(example = "exp-017")]
    pub target_id: String,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

impl AuditLog {
    pub fn new(
        id: impl Into<String>,
        user: impl Into<String>,
        action: AuditAction,
        target_type: TargetType,
        target_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let user = user.into();
        let target_id = target_id.into();
        let details = describe(&user, action, target_type, &target_id);
        Self {
            id: id.into(),
            user,
            action,
            target_type,
            target_id,
            timestamp,
            details,
        }
    }
}

/// Human-readable summary stored in [`AuditLog::details`]
pub fn describe(user: &str, action: AuditAction, target_type: TargetType, target_id: &str) -> String {
    format!("Usuario {user} realizó {action} en {target_type} {target_id}")
}

/// Identifier for the `n`-th log (`log-0001`)
pub fn log_id(n: u64) -> String {
    format!("log-{n:04}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_action_round_trip_through_wire_names() {
        for action in AuditAction::ALL {
            assert_eq!(action.as_str().parse::<AuditAction>().unwrap(), action);
        }
        assert_eq!(
            "approve".parse::<AuditAction>(),
            Err(AuditError::UnknownAction("approve".to_string()))
        );
    }

    #[test]
    fn test_target_type_parse_is_case_sensitive() {
        assert_eq!("report".parse::<TargetType>().unwrap(), TargetType::Report);
        assert!("Report".parse::<TargetType>().is_err());
    }

    #[test]
    fn test_new_builds_details() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let log = AuditLog::new(
            log_id(7),
            "Ana López",
            AuditAction::GenerateReport,
            TargetType::Report,
            "rep-003",
            ts,
        );
        assert_eq!(log.id, "log-0007");
        assert_eq!(
            log.details,
            "Usuario Ana López realizó generate_report en report rep-003"
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let log = AuditLog::new("log-0001", "Admin Dos", AuditAction::ApproveReport, TargetType::Optimisation, "opt-010", ts);
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["targetType"], "optimisation");
        assert_eq!(json["targetId"], "opt-010");
        assert_eq!(json["action"], "approve_report");
        assert_eq!(json["timestamp"], "2025-03-14T09:30:00Z");
    }
}
