//! Cache Entry Module
//!
//! Defines a single cached upstream response with its expiry timestamp.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::http::StatusCode;
use bytes::Bytes;

// == Cached Response ==
/// The part of an entry handed back to callers on a cache hit.
///
/// `body` is an immutable `Bytes` value, so a clone never aliases mutable
/// store-owned memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    /// Upstream status code
    pub status: StatusCode,
    /// Media type to echo back to the client
    pub content_type: String,
    /// Raw upstream payload
    pub body: Bytes,
}

// == Cache Entry ==
/// Represents one cached upstream response and its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response
    pub response: CachedResponse,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    pub fn new(response: CachedResponse, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        Self {
            response,
            created_at: now,
            expires_at: now.saturating_add(ttl.as_millis() as u64),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as `0`.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
