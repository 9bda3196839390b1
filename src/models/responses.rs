//! Response DTOs for the API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;

/// API version reported by the health endpoint
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (always "healthy")
    pub status: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
    /// Server version
    pub version: String,
    /// Time since the server started, e.g. "3h 2m 5s"
    pub uptime: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(uptime: Duration) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: API_VERSION.to_string(),
            uptime: format_uptime(uptime),
        }
    }
}

fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Response body for the readiness endpoint (GET /ready)
///
/// All data is in memory, so every dependency always reports "ok".
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    /// "ready" when all dependencies are ok
    pub status: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
    /// Episode/content store status
    pub database: String,
    /// External API status
    pub external_api: String,
}

impl ReadinessResponse {
    /// Creates a ready response
    pub fn ready() -> Self {
        Self {
            status: "ready".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            database: "ok".to_string(),
            external_api: "ok".to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code, e.g. "not_found"
    pub error: String,
    /// Human-readable description
    pub message: String,
    /// HTTP status code
    pub code: u16,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            code: status.as_u16(),
        }
    }
}
