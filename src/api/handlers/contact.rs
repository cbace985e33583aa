//! Handlers for the contact form endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::dto::contact::ContactResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_key_from_headers;

/// Declared `Origin`; a value that is not valid UTF-8 is kept as empty so it
/// still counts as present and never matches the allow-list.
fn origin_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::ORIGIN)
        .map(|v| v.to_str().unwrap_or_default())
}

/// Accepts a contact form submission.
///
/// # Endpoint
///
/// `POST /api/contact`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "company": "Analytical Engines",   // optional
///   "service": "fullstack",
///   "budget": "25k-50k",               // optional
///   "message": "We would like to talk about..."
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "message": "Message received successfully" }
/// ```
///
/// # Errors
///
/// - 403 if the `Origin` header is present and not allow-listed
/// - 429 with `Retry-After` if the client exceeded its window
/// - 400 for malformed JSON or invalid fields (no field detail is returned)
/// - 413 if the body exceeds the configured limit
///
/// The origin is checked before a body rejection is reported, so a
/// disallowed origin always gets 403.
///
/// Every response except 403 carries CORS headers for the resolved origin.
/// Email delivery failures do not change the outcome.
pub async fn contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let origin = origin_header(&headers);

    if origin.is_some() && !state.origin_policy.is_allowed(origin) {
        warn!(origin = origin.unwrap_or_default(), "Contact submission from disallowed origin");
        return AppError::Forbidden.into_response();
    }

    let cors = state.origin_policy.cors_headers(origin);
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return (cors, rejection).into_response(),
    };

    let client = client_key_from_headers(&headers);

    match state.contact_service.submit(&client, &body).await {
        Ok(_) => (cors, Json(ContactResponse::received())).into_response(),
        Err(e) => (cors, e).into_response(),
    }
}

/// Answers the CORS preflight for the contact endpoint.
///
/// # Endpoint
///
/// `OPTIONS /api/contact`
///
/// Returns 204 with CORS headers and `Access-Control-Max-Age: 86400` when the
/// origin is allow-listed, otherwise 403 with an empty body.
pub async fn contact_preflight_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let origin = origin_header(&headers);

    if !state.origin_policy.is_allowed(origin) {
        return StatusCode::FORBIDDEN.into_response();
    }

    (
        StatusCode::NO_CONTENT,
        state.origin_policy.preflight_headers(origin),
    )
        .into_response()
}
