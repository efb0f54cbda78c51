//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::time::Duration;

const DEFAULT_TTL_MS: u64 = 10_000;
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Age in milliseconds after which an entry is eligible for removal
    pub ttl_ms: u64,
    /// Milliseconds between reaper sweeps
    pub sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 10000)
    /// - `SWEEP_INTERVAL_MS` - Reaper sweep period in milliseconds (default: the TTL)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let ttl_ms = parse_var("CACHE_TTL_MS").unwrap_or(DEFAULT_TTL_MS);
        Self {
            ttl_ms,
            sweep_interval_ms: parse_var("SWEEP_INTERVAL_MS").unwrap_or(ttl_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            sweep_interval_ms: DEFAULT_TTL_MS,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
