//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST    /api/contact` - Contact form submission
//! - `OPTIONS /api/contact` - CORS preflight
//! - `GET     /health`      - Health check: rate limit backend, email transport
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - Generic 500 body instead of a dropped connection
//! - **Security headers** - nosniff, frame denial, referrer and CSP policy
//! - **Body limit** - Caps buffered request bodies
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{panic, security_headers, tracing};
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Default maximum request body size (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `body_limit` - maximum accepted request body in bytes
pub fn app_router(state: AppState, body_limit: usize) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::public_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    let router = security_headers::apply(router)
        .layer(panic::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
