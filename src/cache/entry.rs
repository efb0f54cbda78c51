//! Cache Entry Module
//!
//! Defines a single stored payload together with its insertion timestamp.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry: an immutable payload and the instant it was added.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, shared out to readers without copying
    pub value: Arc<[u8]>,
    /// Insertion timestamp (monotonic clock)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current instant.
    pub fn new(value: Arc<[u8]>) -> Self {
        Self::with_timestamp(value, Instant::now())
    }

    /// Creates a new cache entry stamped with an explicit instant.
    pub fn with_timestamp(value: Arc<[u8]>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns the age of the entry as seen from `now`.
    ///
    /// An entry stamped after `now` has age zero.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` as seen from `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is still live.
    /// Only an age strictly greater than `ttl` makes it eligible for removal.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn payload(bytes: &[u8]) -> Arc<[u8]> {
        Arc::from(bytes)
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(payload(b"test_value"));

        assert_eq!(&*entry.value, b"test_value");
        assert!(entry.age_at(Instant::now()) < Duration::from_secs(1));
    }

    #[test]
    fn test_age_at_future_timestamp_is_zero() {
        let now = Instant::now();
        let entry = CacheEntry::with_timestamp(payload(b"v"), now + Duration::from_secs(5));

        assert_eq!(entry.age_at(now), Duration::ZERO);
        assert!(!entry.is_expired_at(now, Duration::ZERO));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let start = Instant::now();
        let ttl = Duration::from_millis(100);
        let entry = CacheEntry::with_timestamp(payload(b"v"), start);

        assert!(!entry.is_expired_at(start + ttl, ttl), "age == ttl is still live");
        assert!(entry.is_expired_at(start + ttl + Duration::from_millis(1), ttl));
    }
}
