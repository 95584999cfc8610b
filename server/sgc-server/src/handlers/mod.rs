pub mod approvals;
pub mod audit_logs;
pub mod dashboard;
pub mod expenses;
pub mod health;
pub mod optimisation;
pub mod reports;
pub mod settings;
pub mod users;
