//! Converts handler panics into the generic 500 response.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

// The layer relies on unwinding; under `panic = "abort"` the process would
// exit instead of answering 500.
#[cfg(panic = "abort")]
compile_error!("the catch-panic layer requires panic = \"unwind\"");

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Catches panics below this layer and answers with [`AppError::Internal`].
///
/// The panic payload goes to the log; the client only sees the fixed
/// "Failed to process request" body.
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("Request handler panicked: {}", detail);

    AppError::internal(detail).into_response()
}
