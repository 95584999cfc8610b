use accounting_service::Expense;
use audit_engine::{AuditAction, TargetType};
use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::middleware::ActorId;
use crate::server::SgcServer;

/// Expenses waiting for a decision
#[utoipa::path(
    get,
    path = "/api/v1/approvals",
    tag = "approvals",
    responses(
        (status = 200, description = "Pending expenses", body = Vec<Expense>)
    )
)]
pub async fn list_pending(
    State(server): State<SgcServer>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    Ok(Json(api_success(server.ledger.pending())))
}

/// Approve a pending expense
#[utoipa::path(
    post,
    path = "/api/v1/approvals/{id}/approve",
    tag = "approvals",
    params(("id" = String, Path, description = "Expense id", example = "EXP-002")),
    responses(
        (status = 200, description = "Expense approved", body = Expense),
        (status = 404, description = "Expense not found", body = ApiErrorResponse),
        (status = 409, description = "Expense is not pending", body = ApiErrorResponse)
    )
)]
pub async fn approve_expense(
    State(server): State<SgcServer>,
    actor: ActorId,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let expense = server.ledger.approve(&id)?;
    let actor = server.actor_name(actor.as_deref()).await;
    server.record(&actor, AuditAction::ApproveReport, TargetType::Expense, &expense.id);
    Ok(Json(api_success(expense)))
}

/// Reject a pending expense
#[utoipa::path(
    post,
    path = "/api/v1/approvals/{id}/reject",
    tag = "approvals",
    params(("id" = String, Path, description = "Expense id", example = "EXP-002")),
    responses(
        (status = 200, description = "Expense rejected", body = Expense),
        (status = 404, description = "Expense not found", body = ApiErrorResponse),
        (status = 409, description = "Expense is not pending", body = ApiErrorResponse)
    )
)]
pub async fn reject_expense(
    State(server): State<SgcServer>,
    actor: ActorId,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let expense = server.ledger.reject(&id)?;
    let actor = server.actor_name(actor.as_deref()).await;
    server.record(&actor, AuditAction::Update, TargetType::Expense, &expense.id);
    Ok(Json(api_success(expense)))
}
