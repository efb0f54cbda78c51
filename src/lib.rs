//! Expiring Cache - a time-expiring, concurrency-safe in-memory byte cache
//!
//! Stores opaque payloads under string keys and removes them in the background
//! once they are older than a single cache-wide TTL. An HTTP surface exposes the
//! cache as a local service.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, ExpiringCache};
pub use config::Config;
