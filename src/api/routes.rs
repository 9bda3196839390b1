//! API Routes
//!
//! Configures the Axum router with all endpoints and middleware.

use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    about_handler, faq_handler, featured_episode, get_episode, health_handler, list_episodes,
    not_found_handler, ready_handler, AppState,
};
use crate::middleware::{
    panic_response, rate_limit, response_cache, security_headers, ResponseCacheState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Liveness check
/// - `GET /ready` - Readiness check
/// - `GET /api/episodes` - All episodes, newest first
/// - `GET /api/episodes/featured` - Newest episode
/// - `GET /api/episodes/:id` - Episode by id or number
/// - `GET /api/about` - About page
/// - `GET /api/faq` - FAQ page
///
/// # Middleware
/// - `/api/*`: rate limiting, then response caching
/// - All routes: request timeout (408), gzip compression, panic recovery
///   (JSON 500), security headers, CORS, request tracing
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/api/episodes", get(list_episodes))
        .route("/api/episodes/featured", get(featured_episode))
        .route("/api/episodes/:id", get(get_episode))
        .route("/api/about", get(about_handler))
        .route("/api/faq", get(faq_handler))
        .route_layer(from_fn_with_state(
            ResponseCacheState::new(state.cache.clone(), state.cache_ttl),
            response_cache,
        ))
        .route_layer(from_fn_with_state(state.limiter.clone(), rate_limit));

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .merge(api)
        .fallback(not_found_handler)
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn(security_headers))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the CORS policy.
///
/// A `*` entry mirrors the request's origin so credentials stay allowed.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400))
}
