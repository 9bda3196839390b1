//! HTTP Middleware
//!
//! Cross-cutting request handling: response caching, rate limiting, panic
//! recovery and security headers. CORS, compression, timeouts and request
//! tracing come from tower-http and are wired in the router.

pub mod capture;
pub mod rate_limit;
pub mod recovery;
pub mod response_cache;
pub mod security;

pub use capture::CapturedResponse;
pub use rate_limit::{client_key, rate_limit};
pub use recovery::panic_response;
pub use response_cache::{cache_key, response_cache, ResponseCacheState, X_CACHE};
pub use security::security_headers;
