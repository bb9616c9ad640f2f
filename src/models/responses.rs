//! Response DTOs for the proxy's own JSON payloads
//!
//! Proxied upstream bodies are passed through untouched; these types cover
//! only the service's static responders and error bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Service name reported by the static responders
pub const SERVICE_NAME: &str = "swapi-proxy";

/// Response body for the info endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    /// Service name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Routes served by this process
    pub endpoints: Vec<String>,
    /// Crate version
    pub version: String,
}

impl InfoResponse {
    /// Describes this service.
    pub fn current() -> Self {
        Self {
            name: SERVICE_NAME.to_string(),
            description: "Caching REST proxy for the Star Wars API (swapi.info)".to_string(),
            endpoints: vec![
                "GET /healthz".to_string(),
                "GET /stats".to_string(),
                "GET /api/swapi/{resource}".to_string(),
                "GET /api/swapi/{resource}/{id}".to_string(),
            ],
            version: format!("v{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Response body for the health endpoint (GET /healthz)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, always "ok" when the process can answer
    pub status: String,
    /// Service name
    pub service: String,
    /// Current UTC time in RFC 3339 format
    pub time: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
            time: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Number of entries dropped after their TTL elapsed
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Short error message
    pub error: String,
    /// Longer explanation, omitted when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse; an empty `details` is dropped.
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            error: error.into(),
            details: (!details.is_empty()).then_some(details),
        }
    }
}
