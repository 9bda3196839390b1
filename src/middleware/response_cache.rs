//! Response Cache Middleware
//!
//! Serves repeated GET requests from the TTL cache.
//!
//! The cache key is the request path plus `?` and the raw query string when
//! one is present. Query parameters are not normalized: `?a=1&b=2` and
//! `?b=2&a=1` are cached separately.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::cache::TtlCache;
use crate::middleware::capture::{CapturedResponse, MAX_CAPTURE_BYTES};

/// Header reporting whether a response came from the cache
pub const X_CACHE: &str = "x-cache";

// == Layer State ==
/// Cache handle plus the TTL for one installation of the middleware.
#[derive(Debug, Clone)]
pub struct ResponseCacheState {
    cache: Arc<TtlCache>,
    ttl: Duration,
}

impl ResponseCacheState {
    /// # Arguments
    /// * `cache` - Shared cache the responses are stored in
    /// * `ttl` - How long stored responses stay fresh
    pub fn new(cache: Arc<TtlCache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }
}

/// Builds the cache key for a request URI.
pub fn cache_key(uri: &Uri) -> String {
    match uri.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", uri.path(), query),
        _ => uri.path().to_string(),
    }
}

/// Middleware caching successful GET responses.
///
/// Hits are answered without calling the inner handler. Misses run the
/// handler, and only a 200 with a non-empty body is stored. Bodies known to
/// exceed the capture limit are forwarded untouched and never cached.
pub async fn response_cache(
    State(state): State<ResponseCacheState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = cache_key(request.uri());

    if let Some(body) = state.cache.get(&key) {
        debug!(key = %key, "Response cache hit");
        return (
            StatusCode::OK,
            [
                (X_CACHE, HeaderValue::from_static("HIT")),
                (
                    header::CONTENT_TYPE.as_str(),
                    HeaderValue::from_static("application/json"),
                ),
            ],
            body,
        )
            .into_response();
    }

    let response = next.run(request).await;
    if CapturedResponse::exceeds_limit(&response, MAX_CAPTURE_BYTES) {
        debug!(key = %key, "Response too large to cache");
        return response;
    }

    let mut captured = match CapturedResponse::capture(response, MAX_CAPTURE_BYTES).await {
        Ok(captured) => captured,
        Err(e) => return e.into_response(),
    };

    if captured.status() == StatusCode::OK && !captured.body().is_empty() {
        debug!(key = %key, "Response cache miss, storing");
        state.cache.set(key, captured.body().clone(), state.ttl);
        captured
            .headers_mut()
            .insert(X_CACHE, HeaderValue::from_static("MISS"));
    }

    captured.into_response()
}
