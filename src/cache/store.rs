//! TTL Cache Store
//!
//! Thread-safe key to bytes store with per-entry expiry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use axum::body::Bytes;

use crate::cache::CacheEntry;
use crate::tasks::Sweep;

// == TTL Cache ==
/// In-memory cache where every entry carries its own TTL.
///
/// Expired entries are never returned by [`TtlCache::get`], even before the
/// background sweep has physically removed them.
#[derive(Debug, Default)]
pub struct TtlCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the value stored under `key` if it exists and is still live.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let entries = self.read();
        let entry = entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key`, overwriting any previous entry and
    /// restarting its lifetime.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The bytes to store
    /// * `ttl` - How long the entry stays live
    pub fn set(&self, key: impl Into<String>, value: Bytes, ttl: Duration) {
        self.write().insert(key.into(), CacheEntry::new(value, ttl));
    }

    // == Delete ==
    /// Removes the entry for `key`; no-op when absent.
    pub fn delete(&self, key: &str) {
        self.write().remove(key);
    }

    // == Sweep ==
    /// Removes all entries that have outlived their TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map carries no invariant spanning entries, so a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sweep for TtlCache {
    const NAME: &'static str = "response cache";

    fn sweep(&self) -> usize {
        TtlCache::sweep(self)
    }
}
