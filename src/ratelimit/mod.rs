//! Rate Limiting Module
//!
//! Per-client sliding-window admission control.

mod limiter;

pub use limiter::RateLimiter;
