//! Cache Entry Module
//!
//! Defines a single cached response body with its own TTL.

use std::time::{Duration, Instant};

use axum::body::Bytes;

// == Cache Entry ==
/// A stored value together with the instant it was stored and its TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes
    pub value: Bytes,
    /// When the entry was (last) set
    pub stored_at: Instant,
    /// How long the entry stays live after `stored_at`
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stored now.
    pub fn new(value: Bytes, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is still live when its age equals its TTL
    /// exactly; it expires once the age is strictly greater.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.ttl
    }

    /// Checks if the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(Bytes::from_static(b"payload"), Duration::from_secs(60));

        assert_eq!(entry.value, Bytes::from_static(b"payload"));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(Bytes::from_static(b"v"), Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(Bytes::from_static(b"v"), Duration::from_secs(10));

        // Age equal to the TTL is still live
        assert!(!entry.is_expired_at(entry.stored_at + Duration::from_secs(10)));
        assert!(entry.is_expired_at(entry.stored_at + Duration::from_millis(10_001)));
    }
}
