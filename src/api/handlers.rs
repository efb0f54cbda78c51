//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::{ExpiringCache, MAX_KEY_LENGTH};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{AddResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ExpiringCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: ExpiringCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration, starting the cache's reaper.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ExpiringCache::with_sweep_interval(
            config.ttl(),
            config.sweep_interval(),
        ))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Handler for PUT /entries/*key
///
/// Stores the raw request body under `key`, replacing any previous payload.
pub async fn add_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<AddResponse>> {
    validate_key(&key)?;

    let size = body.len();
    state.cache.add(key.clone(), &body[..]);
    debug!("Cached {} bytes under '{}'", size, key);

    Ok(Json(AddResponse::new(key, size)))
}

/// Handler for GET /entries/*key
///
/// Returns the stored payload as `application/octet-stream`.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Vec<u8>> {
    validate_key(&key)?;

    match state.cache.get(&key) {
        Some(value) => Ok(value.to_vec()),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = &state.cache;
    Json(StatsResponse::new(
        cache.stats(),
        cache.ttl(),
        cache.sweep_interval(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_state() -> AppState {
        AppState::new(ExpiringCache::new(Duration::from_secs(300)))
    }

    #[tokio::test]
    async fn test_add_and_get_handler() {
        let state = test_state();

        let result = add_handler(
            State(state.clone()),
            Path("loc/1".to_string()),
            Bytes::from_static(b"{\"name\":\"canalave-city-area\"}"),
        )
        .await;
        assert_eq!(result.unwrap().size, 29);

        let value = get_handler(State(state.clone()), Path("loc/1".to_string()))
            .await
            .unwrap();
        assert_eq!(value, b"{\"name\":\"canalave-city-area\"}");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_empty_key_rejected() {
        let state = test_state();

        let result = add_handler(State(state), Path(String::new()), Bytes::new()).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_add_key_too_long_rejected() {
        let state = test_state();
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = add_handler(State(state.clone()), Path(long_key), Bytes::new()).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
        assert!(state.cache.is_empty());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        state.cache.add("a", b"1".to_vec());
        state.cache.get("a");
        state.cache.get("b");

        let response = stats_handler(State(state)).await;
        assert_eq!(response.stats.hits, 1);
        assert_eq!(response.stats.misses, 1);
        assert_eq!(response.stats.total_entries, 1);
        assert_eq!(response.ttl_ms, 300_000);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
