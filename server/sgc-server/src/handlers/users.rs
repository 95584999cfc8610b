use audit_engine::{AuditAction, TargetType};
use auth_identity::{
    facet_values, parse_roles, parse_statuses, CreateUserRequest, UpdateUserRequest, User,
    UserFilter,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::middleware::ActorId;
use crate::server::SgcServer;
use crate::types::PaginationParams;
use crate::validation::RequestValidation;

/// Query parameters of the user administration table
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    #[param(value_type = Option<u32>, example = 1)]
    pub page: Option<String>,
    #[param(value_type = Option<u32>, example = 10)]
    pub per_page: Option<String>,
    /// Case-insensitive substring of the name or email
    pub q: Option<String>,
    /// `.`-separated roles, e.g. `admin.manager`
    pub role: Option<String>,
    /// `.`-separated sede names
    pub sede: Option<String>,
    /// `.`-separated statuses
    pub status: Option<String>,
}

impl UserListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.clone(),
            per_page: self.per_page.clone(),
        }
    }

    /// # Errors
    /// An unknown role or status.
    pub fn filter(&self) -> Result<UserFilter, ApiError> {
        Ok(UserFilter {
            q: self.q.clone(),
            roles: self.role.as_deref().map(parse_roles).transpose()?.unwrap_or_default(),
            sedes: self
                .sede
                .as_deref()
                .map(|raw| facet_values(raw).map(str::to_string).collect())
                .unwrap_or_default(),
            statuses: self
                .status
                .as_deref()
                .map(parse_statuses)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    pub id: String,
    pub deleted: bool,
}

/// List users with filtering and pagination
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of matching users", body = Vec<User>),
        (status = 400, description = "Unknown role or status filter", body = ApiErrorResponse)
    )
)]
pub async fn list_users(
    State(server): State<SgcServer>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let filter = query.filter()?;
    let pagination = query.pagination();

    let matching = server.users.list(&filter).await?;
    let total = matching.len();
    let page = pagination.slice(matching);

    Ok(Json(pagination.wrap_response(page, total)))
}

/// Get one user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id", example = "usr-001")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found", body = ApiErrorResponse)
    )
)]
pub async fn get_user(
    State(server): State<SgcServer>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    Ok(Json(api_success(server.users.get(&id).await?)))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid user data", body = ApiErrorResponse),
        (status = 409, description = "Email already in use", body = ApiErrorResponse)
    )
)]
pub async fn create_user(
    State(server): State<SgcServer>,
    actor: ActorId,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    request.validate()?;
    let user = server.users.create(request).await?;

    let actor = server.actor_name(actor.as_deref()).await;
    server.record(&actor, AuditAction::Create, TargetType::User, &user.id);
    Ok((StatusCode::CREATED, Json(api_success(user))))
}

/// Update a user account; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    request_body = UpdateUserRequest,
    params(("id" = String, Path, description = "User id", example = "usr-001")),
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = ApiErrorResponse),
        (status = 409, description = "Email already in use", body = ApiErrorResponse)
    )
)]
pub async fn update_user(
    State(server): State<SgcServer>,
    actor: ActorId,
    Path(id): Path<String>,
    Json(patch): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    patch.validate()?;
    let user = server.users.update(&id, patch).await?;

    let actor = server.actor_name(actor.as_deref()).await;
    server.record(&actor, AuditAction::Update, TargetType::User, &user.id);
    Ok(Json(api_success(user)))
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id", example = "usr-010")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 404, description = "User not found", body = ApiErrorResponse)
    )
)]
pub async fn delete_user(
    State(server): State<SgcServer>,
    actor: ActorId,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteUserResponse>>, ApiError> {
    // Resolve the actor first: deleting oneself must still be attributed
    let actor = server.actor_name(actor.as_deref()).await;
    server.users.delete(&id).await?;

    server.record(&actor, AuditAction::Delete, TargetType::User, &id);
    Ok(Json(api_success(DeleteUserResponse { id, deleted: true })))
}
