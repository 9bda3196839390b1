//! Podsite API - Read-only REST API for a podcast website
//!
//! Serves episode listings and about/FAQ content from memory, with a TTL
//! response cache and sliding-window rate limiting in front of the API routes.

pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod middleware;
pub mod models;
pub mod ratelimit;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::{spawn_sweeper, SweepTask};
