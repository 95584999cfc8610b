use audit_engine::{AuditAction, TargetType};
use axum::{extract::State, Json};
use genai_service::{
    LinearProgram, LinearProgramSolution, OptimisationModel, OPTIMISATION_MODELS,
    SOLVE_FAILED_MESSAGE,
};

use crate::error::{api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::middleware::ActorId;
use crate::server::SgcServer;

/// Target id recorded when a linear program is solved
const LINEAR_PROGRAMMING_TARGET: &str = "linear-programming";

/// Operations research models and whether they can be used yet
#[utoipa::path(
    get,
    path = "/api/v1/optimisation/models",
    tag = "optimisation",
    responses(
        (status = 200, description = "Model catalogue", body = Vec<OptimisationModel>)
    )
)]
pub async fn list_models() -> Result<Json<ApiResponse<Vec<OptimisationModel>>>, ApiError> {
    Ok(Json(api_success(OPTIMISATION_MODELS.to_vec())))
}

/// Solve a linear program through the solver flow
#[utoipa::path(
    post,
    path = "/api/v1/optimisation/linear-programming",
    tag = "optimisation",
    request_body = LinearProgram,
    responses(
        (status = 200, description = "Solver result", body = LinearProgramSolution),
        (status = 400, description = "Malformed program", body = ApiErrorResponse),
        (status = 502, description = "Solver flow failed", body = ApiErrorResponse)
    )
)]
pub async fn solve_linear_program(
    State(server): State<SgcServer>,
    actor: ActorId,
    Json(program): Json<LinearProgram>,
) -> Result<Json<ApiResponse<LinearProgramSolution>>, ApiError> {
    let solution = server
        .genai
        .solve_linear_programming(&program)
        .await
        .map_err(|e| ApiError::flow(e, SOLVE_FAILED_MESSAGE))?;

    let actor = server.actor_name(actor.as_deref()).await;
    server.record(
        &actor,
        AuditAction::Create,
        TargetType::Optimisation,
        LINEAR_PROGRAMMING_TARGET,
    );
    Ok(Json(api_success(solution)))
}
