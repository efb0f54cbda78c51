//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: removes entries older than the cache TTL once per sweep interval

mod reaper;

pub(crate) use reaper::spawn_reaper;
