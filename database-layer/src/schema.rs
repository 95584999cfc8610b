// Relational schema for the SGC_USB tables
use crate::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

/// Tables in dependency order; every statement is idempotent
pub const SCHEMA: [&str; 6] = [
    r"CREATE TABLE IF NOT EXISTS sedes (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )",
    r"CREATE TABLE IF NOT EXISTS departments (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        sede TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )",
    r"CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL,
        department TEXT NOT NULL,
        sede TEXT NOT NULL,
        status TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS expenses (
        id TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        amount NUMERIC(12, 2) NOT NULL,
        status TEXT NOT NULL,
        date DATE NOT NULL,
        category TEXT NOT NULL,
        department TEXT NOT NULL,
        sede TEXT NOT NULL,
        user_name TEXT NOT NULL,
        receipt_url TEXT
    )",
    r"CREATE TABLE IF NOT EXISTS audit_logs (
        id TEXT PRIMARY KEY,
        user_name TEXT NOT NULL,
        action TEXT NOT NULL,
        target_type TEXT NOT NULL,
        target_id TEXT NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL,
        details TEXT NOT NULL
    )",
];

/// Create missing tables inside one transaction
pub async fn apply_schema(pool: &PgPool) -> DatabaseResult<()> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    }
    tx.commit().await?;
    info!(tables = SCHEMA.len(), "Schema applied");
    Ok(())
}
