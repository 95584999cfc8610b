//! Database seeding tool
//!
//! Creates the SGC_USB tables when missing and loads the reference data.
//!
//! Usage:
//!   cargo run --bin seed -- --database-url postgres://... [options]

use anyhow::Context;
use audit_engine::AuditLogGenerator;
use auth_identity::reference_users;
use clap::Parser;
use config_engine::{ConfigValidator, SgcConfig};
use database_layer::{apply_schema, mask_url, seed, DatabasePool, SeedData};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Create the SGC_USB schema and load reference data")]
struct Args {
    /// Database connection URL; falls back to `database.url` in the configuration
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for the generated audit logs
    #[arg(long)]
    seed: Option<u64>,

    /// Only create the schema
    #[arg(long)]
    schema_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    if let Err(e) = &dotenv {
        if !e.not_found() {
            warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    let args = Args::parse();
    let config = SgcConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let database_url = args
        .database_url
        .or_else(|| config.database.url.clone())
        .context("No database URL: pass --database-url or set SGC__DATABASE__URL")?;

    info!("Seeding database {}", mask_url(&database_url));
    let pool = DatabasePool::new(&database_url, config.database.max_connections).await?;
    apply_schema(pool.pool()).await?;

    if args.schema_only {
        pool.close().await;
        return Ok(());
    }

    let users = reference_users();
    let names: Vec<String> = users.iter().map(|u| u.name.clone()).collect();
    let mut rng = match args.seed.or(config.mock_data.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let audit_logs =
        AuditLogGenerator::new(&names, config.mock_data.start_date, config.mock_data.end_date).generate(&mut rng);

    let data = SeedData::reference(users, audit_logs);
    let report = seed(pool.pool(), &data).await?;
    info!(
        "Inserted {} sedes, {} departments, {} categories, {} users, {} expenses, {} audit logs",
        report.sedes,
        report.departments,
        report.categories,
        report.users,
        report.expenses,
        report.audit_logs
    );

    pool.close().await;
    Ok(())
}
