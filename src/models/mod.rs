//! Response models for the API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! HTTP response bodies that are not content records themselves.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, ReadinessResponse};
