//! Response models for the cache service API
//!
//! Payloads travel as raw bytes in both directions; only metadata
//! endpoints answer with JSON bodies defined here.

pub mod responses;

// Re-export commonly used types
pub use responses::{AddResponse, HealthResponse, StatsResponse};
