//! Shared Cache Module
//!
//! Reader/writer-locked handle around [`CacheStore`], cloned into every
//! request handler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore, CachedResponse, Lookup};

// == Shared Cache ==
/// Thread-safe cache handle.
///
/// Lookups run under the read lock and proceed in parallel. Inserts and
/// lazy expiry removals take the write lock. No lock is ever held across an
/// `.await` outside this type.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    /// Wraps an existing store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a store with the given capacity and TTL and wraps it.
    pub fn with_capacity(capacity: usize, ttl: Duration) -> Self {
        Self::new(CacheStore::new(capacity, ttl))
    }

    // == Get ==
    /// Returns the fresh response for `key`, if any.
    ///
    /// An expired entry is removed under the write lock before returning
    /// `None`.
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        let lookup = self.inner.read().await.lookup(key);
        match lookup {
            Lookup::Hit(response) => Some(response),
            Lookup::Expired => {
                self.inner.write().await.remove_expired(key);
                None
            }
            Lookup::Missing => None,
        }
    }

    // == Set ==
    /// Inserts or replaces the response for `key`.
    pub async fn set(&self, key: impl Into<String>, response: CachedResponse) {
        self.inner.write().await.set(key.into(), response);
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
