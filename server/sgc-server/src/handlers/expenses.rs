use accounting_service::{Expense, ExpenseFilter, NewExpense};
use audit_engine::{AuditAction, TargetType};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::error::{api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::middleware::ActorId;
use crate::server::SgcServer;
use crate::types::PaginationParams;
use crate::validation::RequestValidation;

/// Query parameters of the expense table
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpenseListQuery {
    #[param(value_type = Option<u32>, example = 1)]
    pub page: Option<String>,
    #[param(value_type = Option<u32>, example = 10)]
    pub per_page: Option<String>,
    /// Case-insensitive substring of the description
    pub description: Option<String>,
    /// `.`-separated statuses, e.g. `pending.draft`
    #[param(example = "pending.draft")]
    pub status: Option<String>,
}

impl ExpenseListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.clone(),
            per_page: self.per_page.clone(),
        }
    }

    /// # Errors
    /// An unknown status in `status`.
    pub fn filter(&self) -> Result<ExpenseFilter, ApiError> {
        let statuses = match self.status.as_deref() {
            Some(raw) => ExpenseFilter::parse_statuses(raw)?,
            None => Default::default(),
        };
        Ok(ExpenseFilter {
            description: self.description.clone(),
            statuses,
        })
    }
}

/// List expenses with filtering and pagination
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    tag = "expenses",
    params(ExpenseListQuery),
    responses(
        (status = 200, description = "Page of matching expenses", body = Vec<Expense>),
        (status = 400, description = "Unknown status filter", body = ApiErrorResponse)
    )
)]
pub async fn list_expenses(
    State(server): State<SgcServer>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<ApiResponse<Vec<Expense>>>, ApiError> {
    let filter = query.filter()?;
    let pagination = query.pagination();

    let matching = server.ledger.list(&filter);
    let total = matching.len();
    let page = pagination.slice(matching);

    Ok(Json(pagination.wrap_response(page, total)))
}

/// Get one expense
#[utoipa::path(
    get,
    path = "/api/v1/expenses/{id}",
    tag = "expenses",
    params(("id" = String, Path, description = "Expense id", example = "EXP-001")),
    responses(
        (status = 200, description = "The expense", body = Expense),
        (status = 404, description = "Expense not found", body = ApiErrorResponse)
    )
)]
pub async fn get_expense(
    State(server): State<SgcServer>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    Ok(Json(api_success(server.ledger.get(&id)?)))
}

/// Submit a new expense for the user named in `X-User-Id`
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    tag = "expenses",
    request_body = NewExpense,
    params(("X-User-Id" = String, Header, description = "Submitting user id", example = "usr-001")),
    responses(
        (status = 201, description = "Expense created as pending", body = Expense),
        (status = 400, description = "Invalid expense or unknown user", body = ApiErrorResponse)
    )
)]
pub async fn create_expense(
    State(server): State<SgcServer>,
    actor: ActorId,
    Json(request): Json<NewExpense>,
) -> Result<(StatusCode, Json<ApiResponse<Expense>>), ApiError> {
    request.validate()?;
    let owner = server.expense_owner(actor.as_deref()).await?;

    let expense = server.ledger.create(request, &owner, server.today())?;
    server.record(&owner.name, AuditAction::Create, TargetType::Expense, &expense.id);

    info!(expense_id = %expense.id, amount = %expense.amount, "Expense submitted");
    Ok((StatusCode::CREATED, Json(api_success(expense))))
}
