use accounting_service::DashboardSummary;
use axum::{extract::State, Json};

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::SgcServer;

/// Dashboard totals, the latest expenses and the per-category breakdown
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    )
)]
pub async fn get_dashboard(
    State(server): State<SgcServer>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let expenses = server.ledger.snapshot();
    let summary = DashboardSummary::compute(server.ledger.catalog(), &expenses);
    Ok(Json(api_success(summary)))
}
