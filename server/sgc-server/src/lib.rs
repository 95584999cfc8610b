//! SGC_USB Server - university cost management API
//!
//! This library provides the HTTP surface of the backend: expense tracking,
//! approvals, user administration, audit log search, reports and the
//! optimisation tools, all over in-memory stores seeded at start-up.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::SgcServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: SgcServer) -> Router {
    let cors = middleware::create_cors_layer(&server.config.server.cors_origins);
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware))
                .layer(from_fn(middleware::audit_logging_middleware)),
        )
        .with_state(server)
}
