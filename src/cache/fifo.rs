//! FIFO Tracker Module
//!
//! Records insertion order of cache keys for first-in-first-out eviction.

use std::collections::{BTreeMap, HashMap};

// == FIFO Tracker ==
/// Tracks insertion order for FIFO eviction.
///
/// Every insertion is stamped with a monotonically increasing sequence
/// number. `order` maps sequence → key (smallest = oldest) and `positions`
/// maps key → its current sequence, so insert, remove and evict are all
/// O(log n) and each key appears at most once.
#[derive(Debug, Default)]
pub struct FifoTracker {
    /// Keys by insertion sequence
    order: BTreeMap<u64, String>,
    /// Current sequence of each tracked key
    positions: HashMap<String, u64>,
    /// Sequence handed to the next insertion
    next_seq: u64,
}

impl FifoTracker {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Insert ==
    /// Records `key` as the newest insertion, dropping its previous record.
    ///
    /// Reads never call this: only an insert or overwrite changes the order.
    pub fn record_insert(&mut self, key: &str) {
        let seq = self.next_seq;
        self.next_seq += 1;

        if let Some(previous) = self.positions.insert(key.to_string(), seq) {
            self.order.remove(&previous);
        }
        self.order.insert(seq, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.positions.remove(key) {
            self.order.remove(&seq);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest inserted key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.positions.remove(&key);
        Some(key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
