//! Timed Cache Module
//!
//! Thread-safe response cache whose entries are swept by a background reaper
//! once they outlive the cache interval.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, CacheStore, StatsRecorder};
use crate::tasks::{first_sweep_at, spawn_reaper_task};

// == Timed Cache ==
/// Memoizes byte payloads by string key and forgets them after `interval`.
///
/// The interval is both the maximum entry age and the period of the
/// background sweep. All methods are safe to call from any number of tasks
/// at once; lookups share the lock, inserts and sweeps take it exclusively.
///
/// Dropping the cache stops the reaper.
#[derive(Debug)]
pub struct TimedCache {
    /// Entry storage shared with the reaper task
    store: Arc<RwLock<CacheStore>>,
    /// Hit/miss/reap counters
    stats: Arc<StatsRecorder>,
    /// Fixed max age and sweep period
    interval: Duration,
    /// Stop signal observed by the reaper
    shutdown: watch::Sender<bool>,
    /// Whether a reaper task was spawned at all
    has_reaper: bool,
    /// Set once `stop` has been called, or from the start without a reaper
    stopped: AtomicBool,
}

impl TimedCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// The first sweep runs one full `interval` after construction. A zero
    /// interval, or one too large to schedule on the monotonic clock,
    /// disables background reaping altogether: entries then live until the
    /// cache is dropped or `reap_expired` is called by hand.
    ///
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn new(interval: Duration) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new(interval)));
        let stats = Arc::new(StatsRecorder::new());
        let (shutdown, shutdown_rx) = watch::channel(false);

        let has_reaper = match first_sweep_at(interval) {
            Some(start) => {
                // The task is detached; it ends on `stop` or when `shutdown` drops
                spawn_reaper_task(store.clone(), stats.clone(), start, interval, shutdown_rx);
                true
            }
            None => {
                warn!(
                    "Cache interval of {:?} cannot be scheduled, entries will never be reaped",
                    interval
                );
                false
            }
        };

        Self {
            store,
            stats,
            interval,
            shutdown,
            has_reaper,
            stopped: AtomicBool::new(!has_reaper),
        }
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key` with a fresh timestamp.
    ///
    /// A `None` value is stored as an empty payload.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Option<Vec<u8>>>) {
        let value = value.into().unwrap_or_default();
        self.store.write().await.set(key.into(), value);
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    ///
    /// Entries are returned until the reaper removes them, however close to
    /// expiry they are.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.store.read().await.get(key).map(<[u8]>::to_vec);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Reap Expired ==
    /// Removes every entry older than the interval.
    ///
    /// This is what the background task runs on each tick. Returns the number
    /// of entries removed.
    pub async fn reap_expired(&self) -> usize {
        let removed = self.store.write().await.reap_expired(Instant::now());
        self.stats.record_reaped(removed);
        removed
    }

    // == Stop ==
    /// Stops future sweeps. Existing entries are left in place and the cache
    /// stays fully usable.
    ///
    /// Returns `false` if there is no reaper to stop, either because it was
    /// already stopped or because the cache never started one; the call then
    /// has no effect.
    pub fn stop(&self) -> bool {
        if !self.has_reaper {
            debug!("Cache has no reaper, nothing to stop");
            return false;
        }
        if self.stopped.swap(true, Ordering::SeqCst) {
            warn!("Cache reaper already stopped, ignoring stop request");
            return false;
        }

        self.shutdown.send_replace(true);
        info!("Cache reaper stop requested");
        true
    }

    // == Is Running ==
    /// Returns true while a reaper exists and has not been stopped.
    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }

    // == Interval ==
    /// Returns the interval the cache was built with.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Length ==
    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Snapshot ==
    /// Returns a copy of every entry currently held.
    pub async fn snapshot(&self) -> HashMap<String, CacheEntry> {
        self.store.read().await.entries().clone()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.len().await;
        self.stats.snapshot(total_entries)
    }
}
