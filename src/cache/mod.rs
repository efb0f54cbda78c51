//! Cache Module
//!
//! Provides an in-memory byte cache with a single TTL and background expiration.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::{ExpiringCache, MAX_INTERVAL, MIN_INTERVAL};
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;

pub(crate) use expiring::SharedStore;

// == Public Constants ==
/// Maximum allowed key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
