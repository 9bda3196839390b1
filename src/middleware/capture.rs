//! Response Capture
//!
//! Drains a response body into memory so it can be inspected and stored, then
//! re-emits the identical response.

use axum::{
    body::{Body, Bytes, HttpBody},
    http::{response::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Largest body the capture will buffer.
pub const MAX_CAPTURE_BYTES: usize = 8 * 1024 * 1024;

// == Captured Response ==
/// A fully buffered response: head plus the complete body bytes.
///
/// The bytes are reference counted, so keeping a copy (for example in a
/// cache) while forwarding the response does not duplicate the payload.
#[derive(Debug)]
pub struct CapturedResponse {
    parts: Parts,
    body: Bytes,
}

impl CapturedResponse {
    /// Returns true when the body is already known to be larger than `limit`
    /// bytes, so capturing it would fail.
    pub fn exceeds_limit(response: &Response, limit: usize) -> bool {
        response.body().size_hint().lower() > limit as u64
    }

    /// Buffers `response`, failing if the body errors or exceeds `limit` bytes.
    pub async fn capture(response: Response, limit: usize) -> Result<Self, ApiError> {
        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(body, limit)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to read response body: {}", e)))?;
        Ok(Self { parts, body })
    }

    pub fn status(&self) -> StatusCode {
        self.parts.status
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.parts.headers
    }

    /// The captured body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl IntoResponse for CapturedResponse {
    fn into_response(self) -> Response {
        Response::from_parts(self.parts, Body::from(self.body))
    }
}
