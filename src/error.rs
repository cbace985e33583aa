//! Caller-facing error taxonomy for the contact endpoint.
//!
//! Every message rendered to the client is a fixed string. Diagnostic detail
//! (validation issues, transport errors, client addresses) is written to the
//! server log at the point of failure and never travels in a response body.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const FORBIDDEN_MESSAGE: &str = "Origin not allowed";
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const VALIDATION_MESSAGE: &str = "Invalid form data";
pub const INTERNAL_MESSAGE: &str = "Failed to process request";

/// JSON body shared by every failed submission response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The declared `Origin` is not on the allow-list.
    #[error("origin not allowed")]
    Forbidden,

    /// The client key exhausted its window; retry after the given delay.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Malformed JSON or a schema violation. `reason` is for the log only.
    #[error("invalid submission: {reason}")]
    Validation { reason: String },

    /// Anything unexpected. `reason` is for the log only.
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl AppError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The only text a caller ever sees for this error.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Forbidden => FORBIDDEN_MESSAGE,
            AppError::RateLimited { .. } => RATE_LIMITED_MESSAGE,
            AppError::Validation { .. } => VALIDATION_MESSAGE,
            AppError::Internal { .. } => INTERNAL_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: self.public_message(),
        };

        let mut response = (status, Json(body)).into_response();

        if let AppError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}
