//! Expiring Cache Module
//!
//! Thread-safe wrapper around [`CacheStore`] that owns a background reaper.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::cache::{CacheStats, CacheStore, StatsCounters};
use crate::tasks::spawn_reaper;

/// Smallest TTL or sweep interval accepted; shorter values are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Largest TTL or sweep interval accepted (30 years); longer values, such as
/// `Duration::MAX` used to mean "never expire", are lowered to this.
pub const MAX_INTERVAL: Duration = Duration::from_secs(86_400 * 365 * 30);

// == Shared Store ==
/// State shared between cache handles and the reaper task.
#[derive(Debug)]
pub(crate) struct SharedStore {
    store: RwLock<CacheStore>,
    stats: StatsCounters,
}

impl SharedStore {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            store: RwLock::new(CacheStore::new(ttl)),
            stats: StatsCounters::new(),
        }
    }

    // A panic in another lock holder must not take the cache down with it.
    // The map is never left half-written, so the poisoned guard is still usable.
    fn read(&self) -> RwLockReadGuard<'_, CacheStore> {
        self.store.read().unwrap_or_else(|poisoned| {
            warn!("Cache lock poisoned, recovering for read");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheStore> {
        self.store.write().unwrap_or_else(|poisoned| {
            warn!("Cache lock poisoned, recovering for write");
            poisoned.into_inner()
        })
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.read().ttl()
    }

    /// Runs one sweep judged at `now`. Returns the number of entries removed
    /// and the number left.
    pub(crate) fn sweep(&self, now: Instant) -> (usize, usize) {
        let (removed, remaining) = {
            let mut store = self.write();
            let removed = store.reap_at(now);
            (removed, store.len())
        };
        self.stats.record_sweep(removed);
        (removed, remaining)
    }
}

// == Expiring Cache ==
/// Concurrency-safe byte cache whose entries are removed once older than a fixed TTL.
///
/// Lookups and inserts are synchronous and only contend briefly on an internal
/// read-write lock, so they can be called from plain threads as well as async tasks.
/// Expiration is eventual: a background task sweeps the map every sweep interval
/// and removes entries whose age strictly exceeds the TTL. Until that sweep runs,
/// an old entry is still returned by [`get`](Self::get).
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use expiring_cache::ExpiringCache;
///
/// #[tokio::main]
/// async fn main() {
///     let cache = ExpiringCache::new(Duration::from_secs(10));
///     cache.add("https://pokeapi.co/api/v2/location-area/", b"{\"count\":1089}".to_vec());
///     assert!(cache.get("https://pokeapi.co/api/v2/location-area/").is_some());
///     cache.shutdown().await;
/// }
/// ```
#[derive(Debug)]
pub struct ExpiringCache {
    shared: Arc<SharedStore>,
    sweep_interval: Duration,
    stop_tx: watch::Sender<bool>,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates an empty cache whose reaper sweeps once per `ttl`.
    ///
    /// Since the sweep period equals the TTL, an entry can stay visible for up to
    /// `2 * ttl` after its last add: once for the TTL itself and once more waiting
    /// for the sweep that first sees it past the TTL.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime, like [`tokio::spawn`].
    pub fn new(ttl: Duration) -> Self {
        Self::with_sweep_interval(ttl, ttl)
    }

    /// Creates an empty cache with a sweep period independent of the TTL.
    ///
    /// A shorter sweep interval tightens the bound on how long an expired entry
    /// stays visible (`ttl + sweep_interval`), at the cost of taking the write
    /// lock more often. Both durations are clamped to
    /// [`MIN_INTERVAL`]..=[`MAX_INTERVAL`].
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime, like [`tokio::spawn`].
    pub fn with_sweep_interval(ttl: Duration, sweep_interval: Duration) -> Self {
        let ttl = ttl.clamp(MIN_INTERVAL, MAX_INTERVAL);
        let sweep_interval = sweep_interval.clamp(MIN_INTERVAL, MAX_INTERVAL);

        let shared = Arc::new(SharedStore::new(ttl));
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = spawn_reaper(Arc::clone(&shared), sweep_interval, stop_rx);

        Self {
            shared,
            sweep_interval,
            stop_tx,
            reaper: Mutex::new(Some(handle)),
        }
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry and resetting its age.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Arc<[u8]>>) {
        let key = key.into();
        let value = value.into();
        self.shared.write().add(key, value);
        self.shared.stats.record_add();
    }

    // == Get ==
    /// Returns the payload stored under `key`, or `None` on a miss.
    pub fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        let value = self.shared.read().get(key);
        match value {
            Some(_) => self.shared.stats.record_hit(),
            None => self.shared.stats.record_miss(),
        }
        value
    }

    // == Reap ==
    /// Runs one sweep immediately instead of waiting for the next tick.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&self) -> usize {
        let (removed, _) = self.shared.sweep(Instant::now());
        removed
    }

    // == Stop ==
    /// Signals the reaper to exit. Calling it more than once has no further effect.
    ///
    /// A sweep in progress always completes before the signal is observed.
    pub fn stop(&self) {
        let was_stopped = self.stop_tx.send_replace(true);
        if !was_stopped {
            info!("Cache reaper stop requested");
        }
    }

    /// Stops the reaper and waits for its task to finish.
    pub async fn shutdown(&self) {
        self.stop();
        let handle = self.reaper_handle().take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!("Cache reaper ended abnormally: {}", err);
            }
        }
    }

    /// Returns true while the reaper task is alive.
    pub fn is_running(&self) -> bool {
        self.reaper_handle()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn reaper_handle(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.reaper.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Accessors ==
    pub fn ttl(&self) -> Duration {
        self.shared.ttl()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    pub fn len(&self) -> usize {
        self.shared.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.read().is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache's activity counters.
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.len();
        self.shared.stats.snapshot(total_entries)
    }
}

impl Drop for ExpiringCache {
    fn drop(&mut self) {
        self.stop();
    }
}
