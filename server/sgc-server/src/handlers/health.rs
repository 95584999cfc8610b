use axum::{extract::State, Json};
use genai_service::SystemStatus;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::SgcServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall health status
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "2025-03-01T10:30:00Z")]
    pub timestamp: String,
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
    /// Per-component checks
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    #[schema(example = "SGC_USB")]
    pub name: String,
    pub version: String,
    pub features: Vec<String>,
}

/// System status response
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub server_name: String,
    /// `operational` when the flow service answers its health probe
    pub status: SystemStatus,
    pub uptime_seconds: u64,
    pub services: HashMap<String, ServiceStatus>,
}

/// Service status information
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    pub name: String,
    #[schema(example = "running")]
    pub status: String,
    #[schema(example = "2025-03-01T10:30:00Z")]
    pub last_check: String,
    /// Error message if any
    pub error: Option<String>,
}

fn uptime_seconds(server: &SgcServer) -> u64 {
    let elapsed = chrono::Utc::now() - server.started_at;
    u64::try_from(elapsed.num_seconds()).unwrap_or(0)
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<SgcServer>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let checks = HashMap::from([
        ("expense_ledger".to_string(), format!("healthy ({} expenses)", server.ledger.len())),
        ("audit_trail".to_string(), format!("healthy ({} entries)", server.audit.len())),
    ]);

    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: uptime_seconds(&server),
        checks,
    };

    Ok(Json(api_success(response)))
}

/// Version information handler
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Version information retrieved successfully", body = VersionResponse)
    )
)]
pub async fn version_info(
    State(server): State<SgcServer>,
) -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    let features = [
        "expenses",
        "approvals",
        "user-administration",
        "audit-logs",
        "reports",
        "linear-programming",
    ]
    .map(str::to_string)
    .to_vec();

    let response = VersionResponse {
        name: server.config.server.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features,
    };

    Ok(Json(api_success(response)))
}

/// System status handler
#[utoipa::path(
    get,
    path = "/status",
    tag = "health",
    responses(
        (status = 200, description = "System status retrieved successfully", body = StatusResponse)
    )
)]
pub async fn system_status(
    State(server): State<SgcServer>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let status = server.genai.system_status().await;
    let now = chrono::Utc::now().to_rfc3339();

    let services = HashMap::from([(
        "genai_flows".to_string(),
        ServiceStatus {
            name: "GenAI flow service".to_string(),
            status: match status {
                SystemStatus::Operational => "running".to_string(),
                SystemStatus::Outage => "unreachable".to_string(),
            },
            last_check: now,
            error: (status == SystemStatus::Outage)
                .then(|| format!("{} did not answer", server.config.genai.base_url)),
        },
    )]);

    let response = StatusResponse {
        server_name: server.config.server.name.clone(),
        status,
        uptime_seconds: uptime_seconds(&server),
        services,
    };

    Ok(Json(api_success(response)))
}
