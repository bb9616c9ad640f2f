//! Cache Module
//!
//! Provides the in-memory response cache with TTL expiration and FIFO
//! eviction.

mod entry;
mod fifo;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CachedResponse};
pub use fifo::FifoTracker;
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsRecorder};
pub use store::{CacheStore, Lookup};
