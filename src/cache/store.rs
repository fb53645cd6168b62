//! Cache Store Module
//!
//! Plain map storage with interval-based expiry. Synchronization lives one
//! level up in [`TimedCache`](crate::cache::TimedCache).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key-value storage whose entries expire once older than `interval`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum entry age, fixed for the lifetime of the store
    interval: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given maximum entry age.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            interval,
        }
    }

    // == Set ==
    /// Stores a payload under `key`, replacing any previous entry and
    /// restarting its age.
    pub fn set(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Returns the payload stored under `key`, regardless of its age.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|entry| entry.value.as_slice())
    }

    // == Reap Expired ==
    /// Removes every entry older than the interval as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let interval = self.interval;
        self.entries.retain(|_, entry| !entry.is_expired(interval, now));
        before - self.entries.len()
    }

    // == Interval ==
    /// Returns the configured maximum entry age.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Entries ==
    /// Borrows the underlying map.
    pub fn entries(&self) -> &HashMap<String, CacheEntry> {
        &self.entries
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(INTERVAL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.interval(), INTERVAL);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(INTERVAL);

        store.set("key1".to_string(), b"value1".to_vec());

        assert_eq!(store.get("key1"), Some(&b"value1"[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = CacheStore::new(INTERVAL);
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_empty_key() {
        let mut store = CacheStore::new(INTERVAL);

        store.set(String::new(), b"anonymous".to_vec());
        assert_eq!(store.get(""), Some(&b"anonymous"[..]));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(INTERVAL);

        store.set("key1".to_string(), b"value1".to_vec());
        store.set("key1".to_string(), b"value2".to_vec());

        assert_eq!(store.get("key1"), Some(&b"value2"[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_restarts_age() {
        let mut store = CacheStore::new(INTERVAL);

        store.set("key1".to_string(), b"value1".to_vec());
        let first = store.entries()["key1"].created_at;
        store.set("key1".to_string(), b"value2".to_vec());

        assert!(store.entries()["key1"].created_at >= first);
    }

    #[test]
    fn test_store_get_ignores_age() {
        let mut store = CacheStore::new(Duration::ZERO);
        store.set("old".to_string(), b"value".to_vec());
        std::thread::sleep(Duration::from_millis(5));

        // Past its max age, but lookups never expire anything on their own
        assert!(store.get("old").is_some());
        assert_eq!(store.reap_expired(Instant::now()), 1);
        assert!(store.get("old").is_none());
    }

    #[test]
    fn test_store_reap_expired_is_selective() {
        let mut store = CacheStore::new(INTERVAL);
        let base = Instant::now();
        store.entries.insert(
            "key1".to_string(),
            CacheEntry {
                value: b"value1".to_vec(),
                created_at: base,
            },
        );
        store.entries.insert(
            "key2".to_string(),
            CacheEntry {
                value: b"value2".to_vec(),
                created_at: base + Duration::from_millis(150),
            },
        );

        let removed = store.reap_expired(base + INTERVAL * 2);

        assert_eq!(removed, 1);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_reap_keeps_fresh_entries() {
        let mut store = CacheStore::new(INTERVAL);
        store.set("key1".to_string(), b"value1".to_vec());
        let now = store.entries()["key1"].created_at + INTERVAL;

        assert_eq!(store.reap_expired(now), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_reap_is_idempotent() {
        let mut store = CacheStore::new(INTERVAL);
        store.set("key1".to_string(), b"value1".to_vec());
        store.set("key2".to_string(), b"value2".to_vec());
        let now = Instant::now() + INTERVAL * 3;
        store.entries.insert(
            "fresh".to_string(),
            CacheEntry {
                value: Vec::new(),
                created_at: now,
            },
        );

        assert_eq!(store.reap_expired(now), 2);
        let survivors: Vec<String> = store.entries().keys().cloned().collect();

        assert_eq!(store.reap_expired(now), 0);
        let again: Vec<String> = store.entries().keys().cloned().collect();
        assert_eq!(survivors, again);
        assert_eq!(survivors, vec!["fresh".to_string()]);
    }
}
