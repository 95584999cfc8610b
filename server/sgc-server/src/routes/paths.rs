//! Centralized API route path constants
//!
//! utoipa `#[path(...)]` attributes require string literals, so the handler
//! docs repeat these paths; keep both in sync. Constants under a domain
//! module are relative to [`API_V1`].

/// API base path
pub const API_V1: &str = "/api/v1";

/// Health check endpoints, served outside the versioned prefix
pub mod health {
    pub const HEALTH: &str = "/health";
    pub const VERSION: &str = "/version";
    pub const STATUS: &str = "/status";
}

/// API documentation endpoints
pub mod docs {
    pub const SWAGGER_UI: &str = "/docs";
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}

pub mod dashboard {
    pub const DASHBOARD: &str = "/dashboard";
}

pub mod expenses {
    pub const EXPENSES: &str = "/expenses";
    pub const EXPENSE_BY_ID: &str = "/expenses/:id";
}

pub mod approvals {
    pub const APPROVALS: &str = "/approvals";
    pub const APPROVE: &str = "/approvals/:id/approve";
    pub const REJECT: &str = "/approvals/:id/reject";
}

pub mod users {
    pub const USERS: &str = "/users";
    pub const USER_BY_ID: &str = "/users/:id";
}

pub mod settings {
    pub const SEDES: &str = "/settings/sedes";
    pub const DEPARTMENTS: &str = "/settings/departments";
    pub const CATEGORIES: &str = "/settings/categories";
}

pub mod audit {
    pub const AUDIT_LOGS: &str = "/audit-logs";
}

pub mod reports {
    pub const EXPENSES: &str = "/reports/expenses";
    pub const EXPORT: &str = "/reports/expenses/export";
    pub const PDF: &str = "/reports/pdf";
}

pub mod optimisation {
    pub const MODELS: &str = "/optimisation/models";
    pub const LINEAR_PROGRAMMING: &str = "/optimisation/linear-programming";
}
