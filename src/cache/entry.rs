//! Cache Entry Module
//!
//! Defines a single timestamped payload held by the cache.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored payload together with the moment it was inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored payload, possibly empty
    pub value: Vec<u8>,
    /// Insertion time on the monotonic clock
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Returns how long the entry has existed as of `now`.
    ///
    /// Saturates to zero when `now` is earlier than the insertion time.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is eligible for reaping.
    ///
    /// Boundary condition: an entry whose age equals `max_age` exactly is still
    /// live; it only expires once its age strictly exceeds `max_age`.
    pub fn is_expired(&self, max_age: Duration, now: Instant) -> bool {
        self.age(now) > max_age
    }
}
