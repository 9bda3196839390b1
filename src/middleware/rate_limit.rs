//! Rate Limit Middleware
//!
//! Rejects clients that exceed their sliding-window quota with a 429.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use crate::error::ApiError;
use crate::ratelimit::RateLimiter;

/// Identifies the client behind a request.
///
/// Proxy headers win over the socket address: first entry of
/// `X-Forwarded-For`, then `X-Real-IP`, then the peer address.
pub fn client_key<B>(request: &axum::http::Request<B>) -> String {
    let headers = request.headers();

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Instant one window from now, saturating at the latest representable time.
fn reset_time(window: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(window)
        .ok()
        .and_then(|window| Utc::now().checked_add_signed(window))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Middleware admitting requests through the shared [`RateLimiter`].
///
/// The advertised reset time is now plus one window, an upper bound rather
/// than the instant the client's oldest request actually leaves the window.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);

    if !limiter.is_allowed(&client) {
        warn!(client = %client, path = %request.uri().path(), "Rate limit exceeded");
        let reset = reset_time(limiter.window()).to_rfc3339_opts(SecondsFormat::Secs, true);
        return ApiError::RateLimited {
            limit: limiter.limit(),
            reset,
        }
        .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    fn app(limiter: Arc<RateLimiter>) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(from_fn_with_state(limiter, rate_limit))
    }

    fn request_from(ip: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .uri("/")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_client_key_precedence() {
        let forwarded = HttpRequest::builder()
            .header("x-forwarded-for", " 203.0.113.7 , 10.0.0.1")
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(client_key(&forwarded), "203.0.113.7");

        let real_ip = HttpRequest::builder()
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(client_key(&real_ip), "198.51.100.2");

        let mut peer = HttpRequest::builder().body(()).unwrap();
        peer.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_key(&peer), "192.0.2.1");

        let anonymous = HttpRequest::builder().body(()).unwrap();
        assert_eq!(client_key(&anonymous), "unknown");
    }

    #[tokio::test]
    async fn test_rejects_over_limit() {
        let app = app(Arc::new(RateLimiter::new(2, Duration::from_secs(60))));

        for _ in 0..2 {
            let response = app.clone().oneshot(request_from("1.1.1.1")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let rejected = app.clone().oneshot(request_from("1.1.1.1")).await.unwrap();
        assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(rejected.headers()["x-ratelimit-limit"], "2");
        assert_eq!(rejected.headers()["x-ratelimit-remaining"], "0");
        let reset = rejected.headers()["x-ratelimit-reset"].to_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(reset).is_ok());

        let bytes = axum::body::to_bytes(rejected.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "rate_limit_exceeded");
        assert_eq!(json["message"], "Too many requests. Please try again later.");
        assert_eq!(json["code"], 429);

        // Other clients are unaffected
        let other = app.oneshot(request_from("2.2.2.2")).await.unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[test]
    fn test_reset_time_saturates() {
        assert_eq!(
            reset_time(Duration::from_secs(1_000_000_000_000_000)),
            DateTime::<Utc>::MAX_UTC
        );
        assert_eq!(reset_time(Duration::MAX), DateTime::<Utc>::MAX_UTC);

        let soon = reset_time(Duration::from_secs(60));
        assert!(soon > Utc::now());
    }

    #[tokio::test]
    async fn test_huge_window_still_rejects_cleanly() {
        let app = app(Arc::new(RateLimiter::new(
            0,
            Duration::from_secs(1_000_000_000_000_000),
        )));

        let rejected = app.oneshot(request_from("3.3.3.3")).await.unwrap();
        assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
        let reset = rejected.headers()["x-ratelimit-reset"].to_str().unwrap();
        assert!(reset.ends_with('Z'));
    }
}
