//! Cache Reaper Task
//!
//! Background task that periodically removes expired cache entries until it
//! is told to stop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{CacheStore, StatsRecorder};

/// Returns when the first sweep should run, one full interval from now.
///
/// `None` when the interval is zero or so large that the deadline cannot be
/// represented; such a cache is never swept in the background.
pub fn first_sweep_at(interval: Duration) -> Option<Instant> {
    if interval.is_zero() {
        return None;
    }
    Instant::now().checked_add(interval)
}

/// Spawns a background task that sweeps expired entries every `interval`,
/// starting at `start` (see [`first_sweep_at`]).
/// Between sweeps the task is parked on the ticker and the
/// shutdown channel; it exits as soon as `true` is published on `shutdown`
/// or the sending half is dropped.
///
/// # Arguments
/// * `cache` - Shared store to sweep
/// * `stats` - Counters updated with the number of reaped entries
/// * `start` - Deadline of the first sweep
/// * `interval` - Sweep period, must be non-zero
/// * `shutdown` - Receiver of the stop signal
///
/// # Example
/// ```ignore
/// let (stop_tx, stop_rx) = watch::channel(false);
/// let interval = Duration::from_secs(5);
/// let start = first_sweep_at(interval).unwrap();
/// let handle = spawn_reaper_task(store, stats, start, interval, stop_rx);
/// // Later:
/// stop_tx.send_replace(true);
/// ```
pub fn spawn_reaper_task(
    cache: Arc<RwLock<CacheStore>>,
    stats: Arc<StatsRecorder>,
    start: Instant,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache reaper with interval of {:?}", interval);

        let mut ticker = time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Cache reaper shutting down");
                        return;
                    }
                }
                _ = ticker.tick() => {
                    let removed = {
                        let mut cache_guard = cache.write().await;
                        cache_guard.reap_expired(std::time::Instant::now())
                    };
                    stats.record_reaped(removed);

                    if removed > 0 {
                        debug!("Cache reap: removed {} expired entries", removed);
                    } else {
                        debug!("Cache reap: no expired entries found");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_store(interval: Duration) -> Arc<RwLock<CacheStore>> {
        Arc::new(RwLock::new(CacheStore::new(interval)))
    }

    fn spawn(
        cache: Arc<RwLock<CacheStore>>,
        stats: Arc<StatsRecorder>,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let start = first_sweep_at(interval).expect("test intervals are representable");
        spawn_reaper_task(cache, stats, start, interval, shutdown)
    }

    #[test]
    fn test_first_sweep_at_rejects_unrepresentable_intervals() {
        assert!(first_sweep_at(Duration::ZERO).is_none());
        assert!(first_sweep_at(Duration::from_secs(u64::MAX)).is_none());
        assert!(first_sweep_at(Duration::MAX).is_none());

        let interval = Duration::from_millis(100);
        let start = first_sweep_at(interval).unwrap();
        assert!(start > Instant::now());
        assert!(start <= Instant::now() + interval);
    }

    #[tokio::test]
    async fn test_reaper_removes_expired_entries() {
        let interval = Duration::from_millis(100);
        let cache = shared_store(interval);
        let stats = Arc::new(StatsRecorder::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        cache
            .write()
            .await
            .set("expire_soon".to_string(), b"value".to_vec());

        let handle = spawn(cache.clone(), stats.clone(), interval, stop_rx);

        // Two sweeps are enough for an entry inserted before the first one
        time::sleep(Duration::from_millis(350)).await;

        assert!(cache.read().await.get("expire_soon").is_none());
        assert_eq!(stats.snapshot(0).reaped, 1);

        stop_tx.send_replace(true);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_reaper_waits_a_full_interval_before_first_sweep() {
        let interval = Duration::from_millis(200);
        let cache = shared_store(Duration::ZERO);
        let stats = Arc::new(StatsRecorder::new());
        let (_stop_tx, stop_rx) = watch::channel(false);

        cache
            .write()
            .await
            .set("key".to_string(), b"value".to_vec());

        // The store itself would reap this entry on any sweep
        let handle = spawn(cache.clone(), stats, interval, stop_rx);
        time::sleep(Duration::from_millis(50)).await;

        assert!(cache.read().await.get("key").is_some());
        handle.abort();
    }

    #[tokio::test]
    async fn test_reaper_preserves_fresh_entries() {
        let cache = shared_store(Duration::from_secs(3600));
        let stats = Arc::new(StatsRecorder::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        cache
            .write()
            .await
            .set("long_lived".to_string(), b"value".to_vec());

        // Sweep often while the entry stays well within its max age
        let handle = spawn(cache.clone(), stats, Duration::from_millis(50), stop_rx);
        time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.read().await.get("long_lived"), Some(&b"value"[..]));

        stop_tx.send_replace(true);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_reaper_stops_on_signal() {
        let cache = shared_store(Duration::from_secs(1));
        let (stop_tx, stop_rx) = watch::channel(false);
        let stats = Arc::new(StatsRecorder::new());
        let handle = spawn(cache, stats, Duration::from_secs(1), stop_rx);

        stop_tx.send_replace(true);

        let joined = time::timeout(Duration::from_millis(500), handle).await;
        assert!(joined.is_ok(), "Reaper should exit promptly after stop");
    }

    #[tokio::test]
    async fn test_reaper_stops_when_sender_dropped() {
        let cache = shared_store(Duration::from_secs(1));
        let (stop_tx, stop_rx) = watch::channel(false);
        let stats = Arc::new(StatsRecorder::new());
        let handle = spawn(cache, stats, Duration::from_secs(1), stop_rx);

        drop(stop_tx);

        let joined = time::timeout(Duration::from_millis(500), handle).await;
        assert!(joined.is_ok(), "Reaper should exit once its owner is gone");
    }
}
