use accounting_service::{Category, Department, Sede};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::SgcServer;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DepartmentQuery {
    /// Campus name; all departments when absent
    #[param(example = "La Paz")]
    pub sede: Option<String>,
}

/// List campuses
#[utoipa::path(
    get,
    path = "/api/v1/settings/sedes",
    tag = "settings",
    responses(
        (status = 200, description = "All sedes", body = Vec<Sede>)
    )
)]
pub async fn list_sedes(
    State(server): State<SgcServer>,
) -> Result<Json<ApiResponse<Vec<Sede>>>, ApiError> {
    Ok(Json(api_success(server.ledger.catalog().sedes.clone())))
}

/// List departments, optionally of one campus
#[utoipa::path(
    get,
    path = "/api/v1/settings/departments",
    tag = "settings",
    params(DepartmentQuery),
    responses(
        (status = 200, description = "Departments", body = Vec<Department>)
    )
)]
pub async fn list_departments(
    State(server): State<SgcServer>,
    Query(query): Query<DepartmentQuery>,
) -> Result<Json<ApiResponse<Vec<Department>>>, ApiError> {
    let sede = query.sede.as_deref().map(str::trim).filter(|s| !s.is_empty());
    Ok(Json(api_success(server.ledger.catalog().departments_in(sede))))
}

/// List expense categories
#[utoipa::path(
    get,
    path = "/api/v1/settings/categories",
    tag = "settings",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(server): State<SgcServer>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    Ok(Json(api_success(server.ledger.catalog().categories.clone())))
}
