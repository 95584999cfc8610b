use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::paths;
use crate::server::SgcServer;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,
        crate::handlers::health::system_status,

        // Expenses and approvals
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::expenses::list_expenses,
        crate::handlers::expenses::get_expense,
        crate::handlers::expenses::create_expense,
        crate::handlers::approvals::list_pending,
        crate::handlers::approvals::approve_expense,
        crate::handlers::approvals::reject_expense,

        // Users
        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,

        // Settings
        crate::handlers::settings::list_sedes,
        crate::handlers::settings::list_departments,
        crate::handlers::settings::list_categories,

        // Audit
        crate::handlers::audit_logs::list_audit_logs,

        // Reports
        crate::handlers::reports::expense_report,
        crate::handlers::reports::export_expenses,
        crate::handlers::reports::generate_pdf,

        // Optimisation
        crate::handlers::optimisation::list_models,
        crate::handlers::optimisation::solve_linear_program,
    ),
    components(
        schemas(
            crate::error::ApiErrorResponse,
            crate::error::ResponseMetadata,
            crate::error::PaginationInfo,

            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,
            crate::handlers::health::StatusResponse,
            crate::handlers::health::ServiceStatus,

            accounting_service::Expense,
            accounting_service::ExpenseStatus,
            accounting_service::NewExpense,
            accounting_service::Sede,
            accounting_service::Department,
            accounting_service::Category,
            accounting_service::DashboardSummary,
            accounting_service::CategoryTotal,
            accounting_service::ReportFilter,
            accounting_service::ExpenseReport,
            accounting_service::ReportKind,

            auth_identity::User,
            auth_identity::UserRole,
            auth_identity::UserStatus,
            auth_identity::CreateUserRequest,
            auth_identity::UpdateUserRequest,
            crate::handlers::users::DeleteUserResponse,

            audit_engine::AuditLog,
            audit_engine::AuditAction,
            audit_engine::TargetType,
            audit_engine::AuditLogPage,

            crate::handlers::reports::PdfReportRequest,
            crate::handlers::reports::PdfReportResponse,

            genai_service::LinearProgram,
            genai_service::LinearProgramSolution,
            genai_service::Objective,
            genai_service::Inequality,
            genai_service::OptimisationModel,
            genai_service::SystemStatus,
        )
    ),
    tags(
        (name = "health", description = "System health and status endpoints"),
        (name = "dashboard", description = "Expense totals and recent activity"),
        (name = "expenses", description = "Expense registration and lookup"),
        (name = "approvals", description = "Approval queue for pending expenses"),
        (name = "users", description = "User administration"),
        (name = "settings", description = "Sedes, departments and expense categories"),
        (name = "audit", description = "Audit log search"),
        (name = "reports", description = "Expense reports, CSV export and branded PDF"),
        (name = "optimisation", description = "Operations research models"),
    ),
    info(
        title = "SGC_USB API",
        version = "1.0.0",
        description = "Sistema de Gestión de Costos - Universidad Salesiana de Bolivia. Expense tracking, approvals, administration, audit logging and reporting.",
        contact(
            name = "SGC_USB Team",
            email = "sistemas@usalesiana.edu.bo",
            url = "https://usalesiana.edu.bo"
        ),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
pub fn create_docs_routes() -> Router<SgcServer> {
    Router::new().merge(SwaggerUi::new(paths::docs::SWAGGER_UI).url(paths::docs::OPENAPI_JSON, ApiDoc::openapi()))
}
