//! API Module
//!
//! HTTP handlers and routing for the podcast site REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /ready` - Readiness check endpoint
//! - `GET /api/episodes` - List episodes, newest first
//! - `GET /api/episodes/featured` - Newest episode
//! - `GET /api/episodes/:id` - Episode by id ("ep007") or number ("7")
//! - `GET /api/about` - About page content
//! - `GET /api/faq` - FAQ content

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_layer, create_router};
