use audit_engine::{AuditLogPage, AuditLogQuery};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ApiError, ApiErrorResponse, ApiResponse};
use crate::server::SgcServer;
use crate::types::PaginationParams;

/// Query parameters of the audit log table
///
/// Every parameter is optional; an absent one does not filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogListQuery {
    /// 1-based page; 0 or unparsable reads as 1
    #[param(value_type = Option<u32>, example = 1)]
    pub page: Option<String>,
    /// Page size; 0 or unparsable reads as 10
    #[serde(rename = "per_page")]
    #[param(value_type = Option<u32>, example = 10)]
    pub per_page: Option<String>,
    /// Case-insensitive substring of the user name
    pub user: Option<String>,
    /// `.`-separated actions, e.g. `create.update`; unknown names match nothing
    #[param(example = "create.update")]
    pub action: Option<String>,
    /// `.`-separated target types, e.g. `expense.report`; unknown names match nothing
    #[param(example = "expense.report")]
    pub target_type: Option<String>,
    /// First day included, `YYYY-MM-DD` or RFC 3339
    #[param(example = "2025-01-01")]
    pub from: Option<String>,
    /// Last day included, `YYYY-MM-DD` or RFC 3339
    #[param(example = "2025-01-31")]
    pub to: Option<String>,
}

impl AuditLogListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.clone(),
            per_page: self.per_page.clone(),
        }
    }

    /// Translate the raw parameters into a trail query
    ///
    /// # Errors
    /// An unreadable date.
    pub fn to_query(&self) -> Result<AuditLogQuery, ApiError> {
        let pagination = self.pagination();
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(AuditLogQuery {
            page: pagination.requested_page(),
            per_page: pagination.requested_per_page(),
            user: non_empty(&self.user),
            actions: self
                .action
                .as_deref()
                .and_then(AuditLogQuery::parse_actions),
            target_types: self
                .target_type
                .as_deref()
                .and_then(AuditLogQuery::parse_target_types),
            from: non_empty(&self.from)
                .map(|raw| AuditLogQuery::parse_date(&raw))
                .transpose()?,
            to: non_empty(&self.to)
                .map(|raw| AuditLogQuery::parse_date(&raw))
                .transpose()?,
        })
    }
}

/// Filter then paginate the audit trail
///
/// Records keep the trail's newest-first order. `totalCount` is the size of
/// the whole filtered set; a page past the end is empty.
#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    tag = "audit",
    params(AuditLogListQuery),
    responses(
        (status = 200, description = "Page of matching audit logs", body = AuditLogPage),
        (status = 400, description = "Unreadable date", body = ApiErrorResponse)
    )
)]
pub async fn list_audit_logs(
    State(server): State<SgcServer>,
    Query(params): Query<AuditLogListQuery>,
) -> Result<Json<ApiResponse<AuditLogPage>>, ApiError> {
    let query = params.to_query()?;
    let page = server.audit.query(&query);

    let pagination = params.pagination();
    let total = page.total_count;
    Ok(Json(pagination.wrap_response(page, total)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_engine::{AuditAction, TargetType};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn params(pairs: &[(&str, &str)]) -> AuditLogListQuery {
        let query: String = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        axum::extract::Query::<AuditLogListQuery>::try_from_uri(
            &format!("/api/v1/audit-logs?{query}").parse().unwrap(),
        )
        .unwrap()
        .0
    }

    #[test]
    fn test_empty_parameters_mean_no_filter() {
        let query = AuditLogListQuery::default().to_query().unwrap();
        assert_eq!(query, AuditLogQuery::default());
    }

    #[test]
    fn test_wire_names() {
        let query = params(&[
            ("page", "2"),
            ("per_page", "5"),
            ("targetType", "expense.report"),
            ("action", "create"),
        ])
        .to_query()
        .unwrap();

        assert_eq!(query.page, Some(2));
        assert_eq!(query.per_page, Some(5));
        let actions = query.actions.unwrap();
        assert_eq!(actions.len(), 1);
        assert!(actions.contains(&AuditAction::Create));
        let target_types = query.target_types.unwrap();
        assert!(target_types.contains(&TargetType::Expense));
        assert!(target_types.contains(&TargetType::Report));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let query = params(&[("user", ""), ("action", ""), ("from", "")]).to_query().unwrap();
        assert_eq!(query, AuditLogQuery::default());
    }

    #[test]
    fn test_dates_accept_rfc3339() {
        let query = params(&[("from", "2025-01-01"), ("to", "2025-01-31T23:00:00Z")])
            .to_query()
            .unwrap();
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(query.to, NaiveDate::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn test_unknown_names_are_kept_as_non_matching() {
        let query = params(&[("action", "create.publish"), ("targetType", "invoice")])
            .to_query()
            .unwrap();
        assert_eq!(query.actions, Some(HashSet::from([AuditAction::Create])));
        assert_eq!(query.target_types, Some(HashSet::new()));
    }

    #[test]
    fn test_garbage_page_falls_back() {
        let query = params(&[("page", "x"), ("per_page", "y")]).to_query().unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 10);
    }
}
