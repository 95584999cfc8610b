use clap::Parser;
use colored::*;
use config_engine::{ConfigValidator, SgcConfig};
use std::{env, path::PathBuf};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{
    field::RecordFields,
    fmt::{self, time::ChronoUtc, FormatFields},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use error_common::{Result, SgcError};
use sgc_server::{create_app, SgcServer};

/// SGC_USB HTTP Server
#[derive(Parser, Debug)]
#[command(name = "sgc-server")]
#[command(about = "University cost management HTTP API server")]
struct Args {
    /// Server bind address, overrides `server.host`
    #[arg(long, env = "SGC_HOST")]
    host: Option<String>,

    /// Server port, overrides `server.port`
    #[arg(short, long, env = "SGC_PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "sgc.yaml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    init_tracing(args.verbose);
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
        Err(e) => {
            if let Some(e) = unreadable_env_file(&e) {
                warn!(error = %e, "Ignoring unreadable .env file");
            }
        }
    }

    let mut config = SgcConfig::load(Some(&args.config))
        .map_err(|e| SgcError::ConfigError(e.to_string()))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
        .validate()
        .map_err(|e| SgcError::ConfigError(e.to_string()))?;

    let addr = config.server.bind_address();
    info!("💼 {}", format!("Starting {} HTTP Server", config.server.name).bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!("🌐 Bind address: {}", addr.bright_yellow());
    info!("🤖 Flow service: {}", config.genai.base_url.bright_yellow());

    // Initialize the server state and the mock dataset
    let server = SgcServer::new(config)?;

    // Create the router with all routes
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SgcError::NetworkError(format!("Failed to bind to {addr}: {e}")))?;

    info!("🚀 {}", format!("SGC_USB server running on http://{addr}").bright_green());
    info!("📋 {}", format!("Health check available at: http://{addr}/health").bright_blue());
    info!("📋 {}", format!("API v1 available at: http://{addr}/api/v1").bright_blue());
    info!("📖 {}", format!("API docs available at: http://{addr}/docs").bright_blue());

    axum::serve(listener, app)
        .await
        .map_err(|e| SgcError::ServerError(format!("HTTP server error: {e}")))?;
    Ok(())
}

/// The error worth reporting from a `.env` load; a missing file is not one
fn unreadable_env_file(error: &dotenvy::Error) -> Option<&dotenvy::Error> {
    (!error.not_found()).then_some(error)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    // Check if we're in development or production
    let is_development =
        env::var("SGC_ENV").unwrap_or_else(|_| "development".to_string()) == "development";
    let use_colors = env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("sgc_server={level},genai_service={level},tower_http=info,reqwest=info").into()
    });

    if is_development && use_colors {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .event_format(ColoredFormatter)
                    .fmt_fields(ColoredFieldFormatter),
            )
            .init();

        print_startup_banner();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    }
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                         💼 SGC_USB                           ║".bright_cyan());
    println!("{}", "║      Sistema de Gestión de Costos - Universidad Salesiana    ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}

// Colored formatter for development
struct ColoredFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ColoredFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        write!(writer, "{} ", chrono::Utc::now().format("%H:%M:%S%.3f").to_string().bright_black())?;

        let level_str = match *metadata.level() {
            Level::TRACE => "TRACE".bright_purple(),
            Level::DEBUG => "DEBUG".bright_blue(),
            Level::INFO => " INFO".bright_green(),
            Level::WARN => " WARN".bright_yellow(),
            Level::ERROR => "ERROR".bright_red(),
        };
        write!(writer, "[{level_str}] ")?;

        if let Some(target) = metadata.target().split("::").last() {
            write!(writer, "{:<15} ", target.bright_cyan())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;

        // File and line for debug/trace
        if metadata.level() >= &Level::DEBUG {
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                let file_short = file.rsplit('/').next().unwrap_or(file);
                write!(writer, " {}", format!("({file_short}:{line})").bright_black())?;
            }
        }

        writeln!(writer)
    }
}

// Colored field formatter
struct ColoredFieldFormatter;

impl<'a> tracing_subscriber::fmt::FormatFields<'a> for ColoredFieldFormatter {
    fn format_fields<R: RecordFields>(
        &self,
        writer: tracing_subscriber::fmt::format::Writer<'_>,
        fields: R,
    ) -> std::fmt::Result {
        let mut visitor = ColoredFieldVisitor {
            writer,
            result: Ok(()),
        };
        fields.record(&mut visitor);
        visitor.result
    }
}

struct ColoredFieldVisitor<'a> {
    writer: tracing_subscriber::fmt::format::Writer<'a>,
    result: std::fmt::Result,
}

impl ColoredFieldVisitor<'_> {
    fn write_field(&mut self, name: &str, value: &str) {
        if self.result.is_err() {
            return;
        }
        self.result = if name == "message" {
            write!(self.writer, "{}", value.white().bold())
        } else {
            write!(
                self.writer,
                " {}={}",
                name.bright_yellow(),
                value.bright_white()
            )
        };
    }
}

impl tracing::field::Visit for ColoredFieldVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // Messages arrive as format_args!, whose Debug output is the plain text
        self.write_field(field.name(), &format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.write_field(field.name(), value);
    }
}
