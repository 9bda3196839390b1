//! Error types for the API server
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == API Error Enum ==
/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed request parameter
    #[error("{0}")]
    BadRequest(String),

    /// Client exceeded its request quota
    #[error("Too many requests. Please try again later.")]
    RateLimited {
        /// Configured requests per window
        limit: usize,
        /// RFC 3339 timestamp after which the client may retry
        reset: String,
    },

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable error code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::RateLimited { .. } => "rate_limit_exceeded",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.code(), self.to_string(), status));
        let mut response = (status, body).into_response();

        if let ApiError::RateLimited { limit, reset } = &self {
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", HeaderValue::from(*limit));
            headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
            if let Ok(value) = HeaderValue::from_str(reset) {
                headers.insert("x-ratelimit-reset", value);
            }
        }

        response
    }
}

// == Content Error Enum ==
/// Failure to load a content file. Always recovered by falling back to the
/// built-in defaults.
#[derive(Error, Debug)]
pub enum ContentError {
    /// File missing or unreadable
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for the expected shape
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File parsed but a required part is missing
    #[error("{} is missing {what}", .path.display())]
    Incomplete { path: PathBuf, what: &'static str },
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rate_limited_headers() {
        let response = ApiError::RateLimited {
            limit: 100,
            reset: "2026-01-01T00:00:00+00:00".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let headers = response.headers();
        assert_eq!(headers["x-ratelimit-limit"], "100");
        assert_eq!(headers["x-ratelimit-remaining"], "0");
        assert_eq!(headers["x-ratelimit-reset"], "2026-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("Episode not found".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Episode not found");
        assert_eq!(json["code"], 404);
    }

    #[test]
    fn test_content_error_display() {
        let err = ContentError::Incomplete {
            path: PathBuf::from("content/about.md"),
            what: "a title",
        };
        assert_eq!(err.to_string(), "content/about.md is missing a title");
    }
}
