// Filter-then-paginate query over the audit trail
use crate::entry::{AuditAction, AuditLog, TargetType};
use crate::error::{AuditError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::debug;
use utoipa::ToSchema;

pub const DEFAULT_PER_PAGE: u32 = 10;

/// Audit-log table query
///
/// Every field is optional; an absent field does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// 1-based page, 0 is read as 1
    pub page: Option<u32>,
    /// Page size, 0 is read as the default
    pub per_page: Option<u32>,
    /// Case-insensitive substring of the user name
    pub user: Option<String>,
    /// Accepted actions; an empty set matches nothing
    pub actions: Option<HashSet<AuditAction>>,
    /// Accepted target types; an empty set matches nothing
    pub target_types: Option<HashSet<TargetType>>,
    /// First day included
    pub from: Option<NaiveDate>,
    /// Last day included
    pub to: Option<NaiveDate>,
}

/// One page of matching records plus the size of the whole match set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogPage {
    pub data: Vec<AuditLog>,
    pub total_count: usize,
}

impl AuditLogQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.filter(|n| *n > 0).unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn offset(&self) -> usize {
        let offset = u64::from(self.page() - 1) * u64::from(self.per_page());
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// True when `log` passes every filter of this query
    pub fn matches(&self, log: &AuditLog) -> bool {
        if let Some(user) = self.user.as_deref().filter(|u| !u.is_empty()) {
            if !log.user.to_lowercase().contains(&user.to_lowercase()) {
                return false;
            }
        }

        if !accepts(self.actions.as_ref(), &log.action) {
            return false;
        }

        if !accepts(self.target_types.as_ref(), &log.target_type) {
            return false;
        }

        within_days(log.timestamp, self.from, self.to)
    }

    /// Filter `logs` in order, then cut out the requested page
    pub fn execute(&self, logs: &[AuditLog]) -> AuditLogPage {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return AuditLogPage {
                    data: Vec::new(),
                    total_count: 0,
                };
            }
        }

        let matching: Vec<&AuditLog> = logs.iter().filter(|log| self.matches(log)).collect();
        let total_count = matching.len();
        let data = matching
            .into_iter()
            .skip(self.offset())
            .take(self.per_page() as usize)
            .cloned()
            .collect();

        AuditLogPage { data, total_count }
    }

    /// Parse a `.`-separated action list such as `create.update`
    ///
    /// Commas are accepted as separators too; empty segments are skipped and
    /// a list without segments is no filter. Unknown names match no record,
    /// so `create.publish` keeps `create` and `publish` alone yields an empty set.
    pub fn parse_actions(raw: &str) -> Option<HashSet<AuditAction>> {
        parse_set(raw)
    }

    /// Parse a `.`-separated target type list such as `expense.report`
    pub fn parse_target_types(raw: &str) -> Option<HashSet<TargetType>> {
        parse_set(raw)
    }

    /// Parse a date bound: `YYYY-MM-DD`, or an RFC 3339 instant whose UTC date is used
    pub fn parse_date(raw: &str) -> Result<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc).date_naive()))
            .map_err(|_| AuditError::InvalidDate(raw.to_string()))
    }
}

fn parse_set<T>(raw: &str) -> Option<HashSet<T>>
where
    T: FromStr<Err = AuditError> + Eq + std::hash::Hash,
{
    let mut segments = raw
        .split(['.', ','])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .peekable();
    segments.peek()?;

    Some(
        segments
            .filter_map(|segment| match T::from_str(segment) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!(error = %e, "Filter value matches no audit log");
                    None
                }
            })
            .collect(),
    )
}

fn accepts<T: Eq + std::hash::Hash>(set: Option<&HashSet<T>>, value: &T) -> bool {
    set.map_or(true, |set| set.contains(value))
}

fn within_days(timestamp: DateTime<Utc>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    let day = timestamp.date_naive();
    from.map_or(true, |from| day >= from) && to.map_or(true, |to| day <= to)
}
