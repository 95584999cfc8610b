//! HTTP-level tests driving the full router with `oneshot`

use async_trait::async_trait;
use audit_engine::{AuditAction, AuditLog, AuditTrail, TargetType};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, TimeZone, Utc};
use config_engine::SgcConfig;
use genai_service::{FlowClient, GenAiError, GenAiResult};
use serde_json::{json, Value};
use sgc_server::{create_app, SgcServer};
use std::sync::Arc;
use tower::ServiceExt;

const PDF_URI: &str = "data:application/pdf;base64,JVBERi0xLjQK";

/// Flow client answering every call from canned values
struct StubFlowClient {
    healthy: bool,
    fail_flows: bool,
}

#[async_trait]
impl FlowClient for StubFlowClient {
    async fn run_flow(&self, flow: &str, _input: Value) -> GenAiResult<Value> {
        if self.fail_flows {
            return Err(GenAiError::Status {
                flow: flow.to_string(),
                status: 500,
                body: "internal trace".to_string(),
            });
        }
        match flow {
            "generateBrandedPdfFlow" => Ok(json!({ "pdfDataUri": PDF_URI })),
            "solveLinearProgrammingFlow" => Ok(json!({
                "status": "Optimal",
                "optimal_value": 36.0,
                "variable_values": { "x1": 2.0, "x2": 6.0 },
                "analysis": "Producir 2 unidades de x1 y 6 de x2."
            })),
            other => Err(GenAiError::Request(format!("unknown flow {other}"))),
        }
    }

    async fn health(&self) -> GenAiResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(GenAiError::Request("connection refused".to_string()))
        }
    }
}

fn test_config() -> SgcConfig {
    let mut config = SgcConfig::default();
    config.mock_data.seed = Some(7);
    config.mock_data.start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    config.mock_data.end_date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    config
}

fn test_server(client: StubFlowClient) -> SgcServer {
    SgcServer::with_flow_client(test_config(), Arc::new(client))
}

fn test_app() -> Router {
    create_app(test_server(StubFlowClient {
        healthy: true,
        fail_flows: false,
    }))
}

/// Fourteen logs, one per day from 2025-02-14 down to 2025-02-01
fn fourteen_logs() -> Vec<AuditLog> {
    (1..=14u32)
        .map(|n| {
            let day = 15 - n;
            let action = if n % 2 == 0 { AuditAction::Create } else { AuditAction::Update };
            let target = if n % 3 == 0 { TargetType::Report } else { TargetType::Expense };
            let user = if n <= 7 { "Maria Garcia" } else { "Juan Pérez" };
            AuditLog::new(
                format!("log-{n:04}"),
                user,
                action,
                target,
                format!("exp-{n:03}"),
                Utc.with_ymd_and_hms(2025, 2, day, 12, 0, 0).unwrap(),
            )
        })
        .collect()
}

fn app_with_fourteen_logs() -> Router {
    let mut server = test_server(StubFlowClient {
        healthy: true,
        fail_flows: false,
    });
    server.audit = Arc::new(AuditTrail::new(fourteen_logs()));
    create_app(server)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).method(Method::GET).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_json(app: &Router, uri: &str, user_id: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header("Content-Type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("X-User-Id", user_id);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

fn ids(data: &Value) -> Vec<String> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

fn new_expense() -> Value {
    json!({
        "description": "Pasajes La Paz - Sucre",
        "amount": 450.5,
        "category": "Transporte",
        "date": "2025-01-15"
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get(&test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_system_status_reflects_flow_health() {
    let (_, body) = get(&test_app(), "/status").await;
    assert_eq!(body["data"]["status"], "operational");

    let app = create_app(test_server(StubFlowClient {
        healthy: false,
        fail_flows: false,
    }));
    let (status, body) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "outage");
}

#[tokio::test]
async fn test_audit_logs_second_page() {
    let app = app_with_fourteen_logs();
    let (status, body) = get(&app, "/api/v1/audit-logs?per_page=5&page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCount"], 14);
    assert_eq!(
        ids(&body["data"]["data"]),
        vec!["log-0006", "log-0007", "log-0008", "log-0009", "log-0010"]
    );

    let pagination = &body["metadata"]["pagination"];
    assert_eq!(pagination["page"], 2);
    assert_eq!(pagination["per_page"], 5);
    assert_eq!(pagination["total_pages"], 3);
    assert_eq!(pagination["has_next"], true);
    assert_eq!(pagination["has_previous"], true);
}

#[tokio::test]
async fn test_audit_logs_page_past_end_is_empty() {
    let app = app_with_fourteen_logs();
    let (status, body) = get(&app, "/api/v1/audit-logs?per_page=5&page=9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"], json!([]));
    assert_eq!(body["data"]["totalCount"], 14);
}

#[tokio::test]
async fn test_audit_logs_filters_combine() {
    let app = app_with_fourteen_logs();
    let (status, body) =
        get(&app, "/api/v1/audit-logs?action=create&targetType=expense&user=maria").await;

    assert_eq!(status, StatusCode::OK);
    // Even n up to 7 that are not multiples of 3
    assert_eq!(ids(&body["data"]["data"]), vec!["log-0002", "log-0004"]);
    assert_eq!(body["data"]["totalCount"], 2);
}

#[tokio::test]
async fn test_audit_logs_inclusive_date_range() {
    let app = app_with_fourteen_logs();
    let (_, body) = get(&app, "/api/v1/audit-logs?from=2025-02-10&to=2025-02-12").await;

    // Days 12, 11 and 10 are logs 3, 4 and 5
    assert_eq!(ids(&body["data"]["data"]), vec!["log-0003", "log-0004", "log-0005"]);

    let (_, body) = get(&app, "/api/v1/audit-logs?from=2025-02-12&to=2025-02-10").await;
    assert_eq!(body["data"]["totalCount"], 0);
}

#[tokio::test]
async fn test_audit_logs_unknown_action_matches_nothing() {
    let app = app_with_fourteen_logs();

    let (status, body) = get(&app, "/api/v1/audit-logs?action=create.publish&per_page=20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCount"], 7);
    assert_eq!(
        ids(&body["data"]["data"]),
        ["log-0002", "log-0004", "log-0006", "log-0008", "log-0010", "log-0012", "log-0014"]
    );

    let (status, body) = get(&app, "/api/v1/audit-logs?action=publish&targetType=invoice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCount"], 0);
    assert!(body["data"]["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_audit_logs_per_page_zero_reads_as_default() {
    let (status, body) = get(&app_with_fourteen_logs(), "/api/v1/audit-logs?per_page=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["metadata"]["pagination"]["per_page"], 10);
    assert_eq!(body["data"]["totalCount"], 14);
}

#[tokio::test]
async fn test_generated_audit_logs_are_newest_first() {
    let (_, body) = get(&test_app(), "/api/v1/audit-logs?per_page=100").await;

    let timestamps: Vec<&str> = body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["timestamp"].as_str().unwrap())
        .collect();
    assert!(!timestamps.is_empty());
    assert!(timestamps.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_create_expense_requires_user() {
    let (status, body) = post_json(&test_app(), "/api/v1/expenses", None, new_expense()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], Value::Null);
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn test_create_expense_is_pending_and_audited() {
    let app = test_app();
    let (status, body) = post_json(&app, "/api/v1/expenses", Some("usr-001"), new_expense()).await;

    assert_eq!(status, StatusCode::CREATED);
    let expense = &body["data"];
    assert_eq!(expense["status"], "pending");
    assert_eq!(expense["user"], "Juan Pérez");
    assert_eq!(expense["sede"], "La Paz");
    assert_eq!(expense["amount"], 450.5);

    let id = expense["id"].as_str().unwrap();
    let (_, fetched) = get(&app, &format!("/api/v1/expenses/{id}")).await;
    assert_eq!(fetched["data"]["description"], "Pasajes La Paz - Sucre");

    let (_, logs) = get(&app, "/api/v1/audit-logs?per_page=1").await;
    let latest = &logs["data"]["data"][0];
    assert_eq!(latest["action"], "create");
    assert_eq!(latest["targetType"], "expense");
    assert_eq!(latest["targetId"], id);
    assert_eq!(latest["user"], "Juan Pérez");
}

#[tokio::test]
async fn test_create_expense_rejects_unknown_category() {
    let mut expense = new_expense();
    expense["category"] = json!("Criptomonedas");
    let (status, body) = post_json(&test_app(), "/api/v1/expenses", Some("usr-001"), expense).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_expense_list_filters_by_status() {
    let (status, body) = get(&test_app(), "/api/v1/expenses?status=pending.draft&per_page=100").await;

    assert_eq!(status, StatusCode::OK);
    let expenses = body["data"].as_array().unwrap();
    assert!(!expenses.is_empty());
    assert!(expenses
        .iter()
        .all(|e| e["status"] == "pending" || e["status"] == "draft"));

    let (status, _) = get(&test_app(), "/api/v1/expenses?status=lost").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expense_not_found() {
    let (status, body) = get(&test_app(), "/api/v1/expenses/EXP-99999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_approve_only_from_pending() {
    let app = test_app();
    let (_, created) = post_json(&app, "/api/v1/expenses", Some("usr-002"), new_expense()).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (_, pending) = get(&app, "/api/v1/approvals").await;
    assert!(ids(&pending["data"]).contains(&id));

    let uri = format!("/api/v1/approvals/{id}/approve");
    let (status, body) = post_json(&app, &uri, Some("usr-003"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    let (_, logs) = get(&app, "/api/v1/audit-logs?per_page=1").await;
    assert_eq!(logs["data"]["data"][0]["action"], "approve_report");
    assert_eq!(logs["data"]["data"][0]["user"], "Carlos Rodriguez");

    let (status, body) = post_json(&app, &format!("/api/v1/approvals/{id}/reject"), None, json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_2003");
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = test_app();
    let request = json!({
        "name": "Rosa Quispe",
        "email": "rosa.quispe@usalesiana.edu.bo",
        "role": "accountant",
        "department": "Contaduría Pública",
        "sede": "La Paz"
    });

    let (status, body) = post_json(&app, "/api/v1/users", Some("usr-009"), request.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "usr-011");
    assert_eq!(body["data"]["status"], "active");
    assert!(body["data"].get("password").is_none());

    let (status, body) = post_json(&app, "/api/v1/users", Some("usr-009"), request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_type"], "conflict");

    let update = Request::builder()
        .uri("/api/v1/users/usr-011")
        .method(Method::PUT)
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "status": "inactive" }).to_string()))
        .unwrap();
    let (status, body) = send(&app, update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "inactive");
    assert_eq!(body["data"]["name"], "Rosa Quispe");

    let delete = |id: &str| {
        Request::builder()
            .uri(format!("/api/v1/users/{id}"))
            .method(Method::DELETE)
            .body(Body::empty())
            .unwrap()
    };
    let (status, body) = send(&app, delete("usr-011")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], true);

    let (status, _) = send(&app, delete("usr-011")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_validation() {
    let request = json!({
        "name": "R",
        "email": "rosa@usalesiana.edu.bo",
        "role": "user",
        "department": "Derecho",
        "sede": "Santa Cruz"
    });
    let (status, body) = post_json(&test_app(), "/api/v1/users", None, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_1001");
}

#[tokio::test]
async fn test_user_filters() {
    let app = test_app();
    let (status, body) = get(&app, "/api/v1/users?role=admin&per_page=100").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]), vec!["usr-009", "usr-010"]);
    assert_eq!(body["metadata"]["total_count"], 2);

    let (_, body) = get(&app, "/api/v1/users?status=inactive&sede=La%20Paz").await;
    assert_eq!(ids(&body["data"]), vec!["usr-008"]);

    let (status, _) = get(&app, "/api/v1/users?role=boss").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_departments_of_one_sede() {
    let (status, body) = get(&test_app(), "/api/v1/settings/departments?sede=La%20Paz").await;

    assert_eq!(status, StatusCode::OK);
    let departments = body["data"].as_array().unwrap();
    assert_eq!(departments.len(), 3);
    assert!(departments.iter().all(|d| d["sede"] == "La Paz"));

    let (_, body) = get(&test_app(), "/api/v1/settings/categories").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let (status, body) = get(&test_app(), "/api/v1/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    let summary = &body["data"];
    assert!(summary["expenseCount"].as_u64().unwrap() > 0);
    assert_eq!(summary["recent"].as_array().unwrap().len(), 5);
    assert!(summary["totalAmount"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_csv_export() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/v1/reports/expenses/export?sede=all")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains("export-gastos-"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("\u{feff}ID,Descripción,Monto,Estado,Fecha,Categoría,Departamento,Sede,Usuario\n"));
}

#[tokio::test]
async fn test_csv_export_of_empty_selection_fails() {
    let (status, body) = get(&test_app(), "/api/v1/reports/expenses/export?sede=Oruro").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_expense_report_selection() {
    let (status, body) = get(
        &test_app(),
        "/api/v1/reports/expenses?from=2025-01-10&to=2025-01-12&category=all",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let report = &body["data"];
    let expenses = report["expenses"].as_array().unwrap();
    assert_eq!(report["count"].as_u64().unwrap() as usize, expenses.len());
    assert!(expenses.iter().all(|e| {
        let date = e["date"].as_str().unwrap();
        ("2025-01-10"..="2025-01-12").contains(&date)
    }));
}

#[tokio::test]
async fn test_generate_pdf() {
    let app = test_app();
    let (status, body) = post_json(&app, "/api/v1/reports/pdf", Some("usr-006"), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pdfDataUri"], PDF_URI);
    assert!(body["data"]["fileName"].as_str().unwrap().starts_with("reporte-gastos-"));

    let (_, logs) = get(&app, "/api/v1/audit-logs?per_page=1&action=generate_report").await;
    assert_eq!(logs["data"]["data"][0]["user"], "Sofia Hernandez");
    assert_eq!(logs["data"]["data"][0]["targetType"], "report");

    let (_, body) = post_json(&app, "/api/v1/reports/pdf", None, json!({ "kind": "final" })).await;
    assert!(body["data"]["fileName"].as_str().unwrap().starts_with("Informe-Final-SGC-USB-"));
}

#[tokio::test]
async fn test_generate_pdf_upstream_failure() {
    let app = create_app(test_server(StubFlowClient {
        healthy: true,
        fail_flows: true,
    }));
    let (status, body) = post_json(&app, "/api/v1/reports/pdf", None, json!({})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Failed to generate PDF report.");
    assert_eq!(body["code"], "UPSTREAM_5001");
}

#[tokio::test]
async fn test_linear_programming() {
    let app = test_app();
    let program = json!({
        "objective": "maximize",
        "objective_coeffs": [3.0, 5.0],
        "constraint_coeffs": [[1.0, 0.0], [0.0, 2.0], [3.0, 2.0]],
        "inequalities": ["<=", "<=", "<="],
        "rhs_values": [4.0, 12.0, 18.0]
    });

    let (status, body) = post_json(&app, "/api/v1/optimisation/linear-programming", None, program).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["optimal_value"], 36.0);
    assert_eq!(body["data"]["variable_values"]["x2"], 6.0);

    let (_, logs) = get(&app, "/api/v1/audit-logs?per_page=1").await;
    assert_eq!(logs["data"]["data"][0]["targetType"], "optimisation");
    assert_eq!(logs["data"]["data"][0]["user"], "Sistema");
}

#[tokio::test]
async fn test_linear_programming_shape_is_checked_locally() {
    let program = json!({
        "objective": "minimize",
        "objective_coeffs": [1.0, 1.0],
        "constraint_coeffs": [[1.0]],
        "inequalities": [">="],
        "rhs_values": [2.0]
    });
    let (status, body) =
        post_json(&test_app(), "/api/v1/optimisation/linear-programming", None, program).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("constraint 1 must have 2 coefficients"));
}

#[tokio::test]
async fn test_optimisation_models() {
    let (_, body) = get(&test_app(), "/api/v1/optimisation/models").await;

    let models = body["data"].as_array().unwrap();
    assert_eq!(models.len(), 5);
    let available: Vec<&str> = models
        .iter()
        .filter(|m| m["available"] == true)
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(available, vec!["linear-programming"]);
}
