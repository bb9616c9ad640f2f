//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with FIFO tracking and lazy
//! TTL expiration. The store itself is unsynchronised; see
//! [`SharedCache`](crate::cache::SharedCache) for the locked handle.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, CachedResponse, FifoTracker, StatsRecorder};

// == Lookup ==
/// Outcome of a read-only lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Fresh entry found
    Hit(CachedResponse),
    /// Entry exists but its TTL has elapsed; the caller should remove it
    Expired,
    /// No entry for the key
    Missing,
}

// == Cache Store ==
/// Bounded response storage with FIFO eviction and a fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-response storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion order tracker
    fifo: FifoTracker,
    /// Performance counters
    stats: StatsRecorder,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied to every insertion
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `ttl` - Lifetime of every entry, counted from insertion
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            fifo: FifoTracker::new(),
            stats: StatsRecorder::new(),
            capacity,
            ttl,
        }
    }

    // == Lookup ==
    /// Looks up a key without mutating the map.
    ///
    /// Records a hit for a fresh entry and a miss otherwise. The returned
    /// response owns its data; the body is an immutable `Bytes` handle.
    pub fn lookup(&self, key: &str) -> Lookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.stats.record_miss();
                Lookup::Expired
            }
            Some(entry) => {
                self.stats.record_hit();
                Lookup::Hit(entry.response.clone())
            }
            None => {
                self.stats.record_miss();
                Lookup::Missing
            }
        }
    }

    // == Get ==
    /// Retrieves a fresh response, removing the entry if it has expired.
    pub fn get(&mut self, key: &str) -> Option<CachedResponse> {
        match self.lookup(key) {
            Lookup::Hit(response) => Some(response),
            Lookup::Expired => {
                self.remove_expired(key);
                None
            }
            Lookup::Missing => None,
        }
    }

    // == Set ==
    /// Stores a response under `key` with expiry `now + ttl`.
    ///
    /// If the key already exists, the entry is replaced and becomes the
    /// newest insertion. If the key is new and the cache is at capacity, the
    /// oldest inserted entry is evicted first.
    pub fn set(&mut self, key: String, response: CachedResponse) {
        if self.capacity == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted_key) = self.fifo.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
                tracing::debug!(key = %evicted_key, "Evicted oldest cache entry");
            }
        }

        let entry = CacheEntry::new(response, self.ttl);
        self.entries.insert(key.clone(), entry);
        self.fifo.record_insert(&key);
    }

    // == Remove Expired ==
    /// Removes `key` only if its entry is still expired.
    ///
    /// The re-check matters when another writer refreshed the key between the
    /// caller's lookup and this call. Returns true if an entry was removed.
    pub fn remove_expired(&mut self, key: &str) -> bool {
        let expired = self.entries.get(key).is_some_and(CacheEntry::is_expired);
        if expired {
            self.entries.remove(key);
            self.fifo.remove(key);
            self.stats.record_expiration();
        }
        expired
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the current number of entries in the cache, including stale
    /// entries not yet observed by a lookup.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of insertion-order records; always equal to `len()`.
    #[cfg(test)]
    pub(crate) fn order_len(&self) -> usize {
        self.fifo.len()
    }
}
