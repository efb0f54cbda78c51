//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing JSON response bodies.

use std::time::Duration;

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the add operation (PUT /entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
    /// Payload size in bytes
    pub size: usize,
}

impl AddResponse {
    /// Creates a new AddResponse
    pub fn new(key: impl Into<String>, size: usize) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached successfully", key),
            key,
            size,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Activity counters and current entry count
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Entry TTL in milliseconds
    pub ttl_ms: u64,
    /// Reaper sweep period in milliseconds
    pub sweep_interval_ms: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a stats snapshot and the cache timings
    pub fn new(stats: CacheStats, ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            ttl_ms: millis(ttl),
            sweep_interval_ms: millis(sweep_interval),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_response_serialize() {
        let resp = AddResponse::new("loc/1", 42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["key"], "loc/1");
        assert_eq!(json["size"], 42);
        assert!(json["message"].as_str().unwrap().contains("successfully"));
    }

    #[test]
    fn test_stats_response_is_flat() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            adds: 10,
            sweeps: 3,
            reaped: 4,
            total_entries: 6,
        };
        let resp = StatsResponse::new(stats, Duration::from_secs(10), Duration::from_secs(5));
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["hits"], 80);
        assert_eq!(json["reaped"], 4);
        assert_eq!(json["total_entries"], 6);
        assert_eq!(json["ttl_ms"], 10_000);
        assert_eq!(json["sweep_interval_ms"], 5_000);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new(CacheStats::default(), Duration::ZERO, Duration::ZERO);
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_stats_response_saturates_huge_durations() {
        let resp = StatsResponse::new(CacheStats::default(), Duration::MAX, Duration::MAX);
        assert_eq!(resp.ttl_ms, u64::MAX);
        assert_eq!(resp.sweep_interval_ms, u64::MAX);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
