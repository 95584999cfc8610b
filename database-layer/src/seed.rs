// Reference data loading
use crate::error::DatabaseResult;
use accounting_service::{Catalog, Expense, ExpenseStatus};
use audit_engine::AuditLog;
use auth_identity::User;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

/// Audit log entries written by a seed run
pub const SEEDED_AUDIT_LOGS: usize = 100;

/// Everything written by a seed run
#[derive(Debug, Clone)]
pub struct SeedData {
    pub catalog: Catalog,
    pub users: Vec<User>,
    pub expenses: Vec<Expense>,
    pub audit_logs: Vec<AuditLog>,
}

impl SeedData {
    /// Reference catalog and users, the sample expenses and the newest
    /// [`SEEDED_AUDIT_LOGS`] entries of `audit_logs`
    pub fn reference(users: Vec<User>, mut audit_logs: Vec<AuditLog>) -> Self {
        audit_logs.truncate(SEEDED_AUDIT_LOGS);
        Self {
            catalog: Catalog::reference(),
            users,
            expenses: sample_expenses(),
            audit_logs,
        }
    }
}

/// Rows affected per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub sedes: u64,
    pub departments: u64,
    pub categories: u64,
    pub users: u64,
    pub expenses: u64,
    pub audit_logs: u64,
}

fn sample(
    id: &str,
    description: &str,
    amount: i64,
    status: ExpenseStatus,
    day: (i32, u32, u32),
    category: &str,
    department: &str,
    sede: &str,
    user: &str,
) -> Option<Expense> {
    Some(Expense {
        id: id.to_string(),
        description: description.to_string(),
        amount: Decimal::new(amount, 0),
        status,
        date: NaiveDate::from_ymd_opt(day.0, day.1, day.2)?,
        category: category.to_string(),
        department: department.to_string(),
        sede: sede.to_string(),
        user: user.to_string(),
        receipt_url: None,
    })
}

/// The three sample expenses stored alongside the reference data
pub fn sample_expenses() -> Vec<Expense> {
    [
        sample(
            "exp-001",
            "Compra de material de oficina",
            150,
            ExpenseStatus::Approved,
            (2024, 9, 1),
            "Material de Oficina",
            "Ingeniería de Sistemas",
            "La Paz",
            "Juan Pérez",
        ),
        sample(
            "exp-002",
            "Viaje a Cochabamba",
            300,
            ExpenseStatus::Pending,
            (2024, 9, 5),
            "Viáticos y Hospedaje",
            "Administración de Empresas",
            "Cochabamba",
            "Maria Garcia",
        ),
        sample(
            "exp-003",
            "Software de contabilidad",
            500,
            ExpenseStatus::Rejected,
            (2024, 9, 10),
            "Software y Licencias",
            "Contaduría Pública",
            "La Paz",
            "Carlos Rodriguez",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Insert seed data, leaving rows that already exist untouched
pub async fn seed(pool: &PgPool, data: &SeedData) -> DatabaseResult<SeedReport> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for sede in &data.catalog.sedes {
        report.sedes += sqlx::query("INSERT INTO sedes (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(&sede.id)
            .bind(&sede.name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    for department in &data.catalog.departments {
        report.departments += sqlx::query(
            "INSERT INTO departments (id, name, sede) VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&department.id)
        .bind(&department.name)
        .bind(&department.sede)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for category in &data.catalog.categories {
        report.categories +=
            sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
                .bind(&category.id)
                .bind(&category.name)
                .execute(&mut *tx)
                .await?
                .rows_affected();
    }

    for user in &data.users {
        report.users += sqlx::query(
            "INSERT INTO users (id, name, email, password, role, department, sede, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(&user.department)
        .bind(&user.sede)
        .bind(user.status.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for expense in &data.expenses {
        report.expenses += sqlx::query(
            "INSERT INTO expenses (id, description, amount, status, date, category, department, sede, user_name, receipt_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&expense.id)
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(expense.status.as_str())
        .bind(expense.date)
        .bind(&expense.category)
        .bind(&expense.department)
        .bind(&expense.sede)
        .bind(&expense.user)
        .bind(expense.receipt_url.as_deref())
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for log in &data.audit_logs {
        report.audit_logs += sqlx::query(
            "INSERT INTO audit_logs (id, user_name, action, target_type, target_id, timestamp, details) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&log.id)
        .bind(&log.user)
        .bind(log.action.as_str())
        .bind(log.target_type.as_str())
        .bind(&log.target_id)
        .bind(log.timestamp)
        .bind(&log.details)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    info!(?report, "Seeding completed");
    Ok(report)
}
