//! Cache Module
//!
//! Provides an in-memory byte cache with per-entry TTL expiration.

mod entry;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use store::TtlCache;
