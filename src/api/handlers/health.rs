//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Rate limit backend reachable
/// - **503 Service Unavailable**: Rate limit backend degraded
///
/// Email is reported for information only: a disabled transport is a
/// supported configuration, not a fault.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "rate_limiter": { "status": "ok", "message": "Backend: redis" },
///     "email": { "status": "ok", "message": "Transport configured" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let rate_limiter_check = check_rate_limiter(&state).await;
    let email_check = check_email(&state);

    let healthy = rate_limiter_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            rate_limiter: rate_limiter_check,
            email: email_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_rate_limiter(state: &AppState) -> CheckStatus {
    let limiter = state.contact_service.rate_limiter();

    if limiter.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Backend: {}", limiter.backend())),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Backend {} unreachable", limiter.backend())),
        }
    }
}

fn check_email(state: &AppState) -> CheckStatus {
    let message = if state.contact_service.notifier().is_enabled() {
        "Transport configured"
    } else {
        "Transport not configured, notifications disabled"
    };

    CheckStatus {
        status: "ok".to_string(),
        message: Some(message.to_string()),
    }
}
