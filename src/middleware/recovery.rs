//! Panic Recovery
//!
//! Renders a panicking handler as the standard JSON 500 instead of dropping
//! the connection. Installed through tower-http's `CatchPanicLayer`.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::ApiError;

/// Turns a caught panic payload into an `internal_error` response.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "Request handler panicked");

    ApiError::Internal("Internal server error".to_string()).into_response()
}
