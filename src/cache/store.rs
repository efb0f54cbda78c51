//! Cache Store Module
//!
//! Unsynchronized map of payloads with a single cache-wide TTL.
//! [`ExpiringCache`](crate::cache::ExpiringCache) owns one behind its lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key-value storage judged against one fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Age beyond which an entry is removed by the next sweep
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    // == Add ==
    /// Stores a payload under `key`, stamped with the current instant.
    ///
    /// If the key already exists, the old payload is dropped and the age restarts at zero.
    pub fn add(&mut self, key: String, value: Arc<[u8]>) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    /// Stores a payload under `key` with an explicit insertion instant.
    pub fn add_at(&mut self, key: String, value: Arc<[u8]>, now: Instant) {
        self.entries.insert(key, CacheEntry::with_timestamp(value, now));
    }

    // == Get ==
    /// Returns the payload stored under `key`, if present.
    ///
    /// Presence is the only test: an entry past its TTL that no sweep has
    /// removed yet is still returned.
    pub fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry.value))
    }

    // == Reap ==
    /// Removes every entry whose age at `now` strictly exceeds the TTL.
    ///
    /// All entries are judged against the same `now`. Returns the number removed.
    pub fn reap_at(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now, ttl));
        before - self.entries.len()
    }

    /// Returns the TTL this store judges entries against.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
