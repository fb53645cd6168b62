//! Cache Module
//!
//! Provides an in-memory response cache with interval-based background expiry.

mod entry;
mod stats;
mod store;
mod timed;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;
pub use timed::TimedCache;
