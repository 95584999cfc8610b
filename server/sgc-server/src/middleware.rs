use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Header carrying the id of the acting user
pub const USER_ID_HEADER: &str = "x-user-id";

/// The `X-User-Id` header of a request, if any
///
/// Only used to attribute audit entries; it is not an authentication
/// mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorId(pub Option<String>);

impl ActorId {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ActorId(user_id(&parts.headers).map(str::to_string)))
    }
}

fn user_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Request timing middleware
pub async fn request_timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let elapsed = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        duration_ms = elapsed.as_millis(),
        status = response.status().as_u16(),
        "Request processed"
    );

    response
}

/// Access logging middleware keyed by the acting user
pub async fn audit_logging_middleware(headers: HeaderMap, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = user_id(&headers).unwrap_or("anonymous").to_string();

    tracing::debug!(
        method = %method,
        uri = %uri,
        user_id = %user_id,
        "Request received"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        user_id = %user_id,
        status = response.status().as_u16(),
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Request completed"
    );

    response
}

/// Create CORS layer for the configured frontend origins
///
/// Origins that are not valid header values are skipped with a warning.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600))
}
