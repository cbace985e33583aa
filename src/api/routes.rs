//! API route configuration.

use crate::api::handlers::{contact_handler, contact_preflight_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Public API routes. The contact endpoint applies its own origin policy and
/// rate limit inside the handler, so no auth or governor layer is attached.
///
/// # Endpoints
///
/// - `POST    /contact` - Submit the contact form
/// - `OPTIONS /contact` - CORS preflight
pub fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/contact",
        post(contact_handler).options(contact_preflight_handler),
    )
}
