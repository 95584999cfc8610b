use accounting_service::{
    csv_file_name, export_csv, ExpenseReport, PdfReportData, ReportFilter, ReportKind,
};
use audit_engine::{AuditAction, TargetType};
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use genai_service::{BrandedPdfRequest, PDF_FAILED_MESSAGE};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{api_success, ApiError, ApiErrorResponse, ApiResponse};
use crate::middleware::ActorId;
use crate::server::SgcServer;

/// Report selection as query parameters
///
/// `sede`, `department` and `category` take display names or `all`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// First day included, `YYYY-MM-DD`; needs `to`
    #[param(example = "2025-01-01")]
    pub from: Option<String>,
    /// Last day included, `YYYY-MM-DD`; needs `from`
    #[param(example = "2025-03-31")]
    pub to: Option<String>,
    #[param(example = "La Paz")]
    pub sede: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
}

impl ReportQuery {
    /// # Errors
    /// A date that is not `YYYY-MM-DD`.
    pub fn to_filter(&self) -> Result<ReportFilter, ApiError> {
        Ok(ReportFilter {
            from: parse_day("from", self.from.as_deref())?,
            to: parse_day("to", self.to.as_deref())?,
            sede: self.sede.clone(),
            department: self.department.clone(),
            category: self.category.clone(),
        })
    }
}

fn parse_day(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::validation(format!("{field} must be a YYYY-MM-DD date, got '{raw}'"))),
    }
}

/// Body of a branded PDF request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PdfReportRequest {
    /// `standard` (default) or `final`
    pub kind: Option<ReportKind>,
    /// Selection for a standard report; ignored by the final report
    #[serde(default)]
    pub filter: ReportFilter,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfReportResponse {
    /// `data:application/pdf;base64,...`
    pub pdf_data_uri: String,
    #[schema(example = "reporte-gastos-2025-03-01.pdf")]
    pub file_name: String,
}

/// Totals and rows of the current report selection
#[utoipa::path(
    get,
    path = "/api/v1/reports/expenses",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report over the selection", body = ExpenseReport),
        (status = 400, description = "Invalid date", body = ApiErrorResponse)
    )
)]
pub async fn expense_report(
    State(server): State<SgcServer>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<ExpenseReport>>, ApiError> {
    let filter = query.to_filter()?;
    let expenses = server.ledger.select(&filter);
    let report = ExpenseReport::new(server.ledger.catalog(), filter, expenses);
    Ok(Json(api_success(report)))
}

/// Download the selection as a UTF-8 CSV file
#[utoipa::path(
    get,
    path = "/api/v1/reports/expenses/export",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 400, description = "Empty selection or invalid date", body = ApiErrorResponse)
    )
)]
pub async fn export_expenses(
    State(server): State<SgcServer>,
    actor: ActorId,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let filter = query.to_filter()?;
    let expenses = server.ledger.select(&filter);
    let csv = export_csv(&expenses)?;
    let file_name = csv_file_name(server.today());

    let actor = server.actor_name(actor.as_deref()).await;
    server.record(&actor, AuditAction::GenerateReport, TargetType::Report, &file_name);
    info!(rows = expenses.len(), file = %file_name, "CSV export generated");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Render a branded PDF through the flow service
#[utoipa::path(
    post,
    path = "/api/v1/reports/pdf",
    tag = "reports",
    request_body = PdfReportRequest,
    responses(
        (status = 200, description = "Generated PDF as a data URI", body = PdfReportResponse),
        (status = 400, description = "Empty selection for a standard report", body = ApiErrorResponse),
        (status = 502, description = "Failed to generate PDF report.", body = ApiErrorResponse)
    )
)]
pub async fn generate_pdf(
    State(server): State<SgcServer>,
    actor: ActorId,
    Json(request): Json<PdfReportRequest>,
) -> Result<Json<ApiResponse<PdfReportResponse>>, ApiError> {
    let kind = request.kind.unwrap_or(ReportKind::Standard);
    let today = server.today();

    let expenses = if kind.is_final() {
        Vec::new()
    } else {
        server.ledger.select(&request.filter)
    };
    let data = PdfReportData::build(kind, expenses, today)?;
    let brand_guidelines = Some(kind.brand_guidelines())
        .filter(|g| !g.is_empty())
        .map(str::to_string);

    let pdf = server
        .genai
        .generate_branded_pdf(BrandedPdfRequest {
            report_data: serde_json::to_string(&data)?,
            brand_guidelines,
        })
        .await
        .map_err(|e| ApiError::flow(e, PDF_FAILED_MESSAGE))?;

    let file_name = kind.file_name(today);
    let actor = server.actor_name(actor.as_deref()).await;
    server.record(&actor, AuditAction::GenerateReport, TargetType::Report, &file_name);

    Ok(Json(api_success(PdfReportResponse {
        pdf_data_uri: pdf.into_string(),
        file_name,
    })))
}
