pub mod paths;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{
        approvals, audit_logs, dashboard, expenses, health, optimisation, reports, settings, users,
    },
    openapi,
    server::SgcServer,
};

/// Create health check routes
pub fn health_routes() -> Router<SgcServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
        .route(paths::health::STATUS, get(health::system_status))
}

/// Create expense and approval routes
pub fn expense_routes() -> Router<SgcServer> {
    Router::new()
        .route(paths::dashboard::DASHBOARD, get(dashboard::get_dashboard))
        .route(
            paths::expenses::EXPENSES,
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route(paths::expenses::EXPENSE_BY_ID, get(expenses::get_expense))
        .route(paths::approvals::APPROVALS, get(approvals::list_pending))
        .route(paths::approvals::APPROVE, post(approvals::approve_expense))
        .route(paths::approvals::REJECT, post(approvals::reject_expense))
}

/// Create user administration routes
pub fn user_routes() -> Router<SgcServer> {
    Router::new()
        .route(
            paths::users::USERS,
            get(users::list_users).post(users::create_user),
        )
        .route(
            paths::users::USER_BY_ID,
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

/// Create settings catalog routes
pub fn settings_routes() -> Router<SgcServer> {
    Router::new()
        .route(paths::settings::SEDES, get(settings::list_sedes))
        .route(paths::settings::DEPARTMENTS, get(settings::list_departments))
        .route(paths::settings::CATEGORIES, get(settings::list_categories))
}

/// Create audit log routes
pub fn audit_routes() -> Router<SgcServer> {
    Router::new().route(paths::audit::AUDIT_LOGS, get(audit_logs::list_audit_logs))
}

/// Create reporting routes
pub fn report_routes() -> Router<SgcServer> {
    Router::new()
        .route(paths::reports::EXPENSES, get(reports::expense_report))
        .route(paths::reports::EXPORT, get(reports::export_expenses))
        .route(paths::reports::PDF, post(reports::generate_pdf))
}

/// Create operations research routes
pub fn optimisation_routes() -> Router<SgcServer> {
    Router::new()
        .route(paths::optimisation::MODELS, get(optimisation::list_models))
        .route(
            paths::optimisation::LINEAR_PROGRAMMING,
            post(optimisation::solve_linear_program),
        )
}

/// Create API v1 routes
pub fn api_v1_routes() -> Router<SgcServer> {
    Router::new()
        .merge(expense_routes())
        .merge(user_routes())
        .merge(settings_routes())
        .merge(audit_routes())
        .merge(report_routes())
        .merge(optimisation_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<SgcServer> {
    Router::new()
        .merge(health_routes())
        .merge(openapi::create_docs_routes())
        .nest(paths::API_V1, api_v1_routes())
}
