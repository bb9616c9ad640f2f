//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default upstream the proxy forwards cache misses to
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://swapi.info/api/";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of cached upstream responses
    pub cache_capacity: usize,
    /// Lifetime of a cached response in seconds
    pub cache_ttl: u64,
    /// Base URL every proxied path is appended to; always ends with `/`
    pub upstream_base_url: String,
    /// Per-request timeout for upstream fetches in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `CACHE_CAPACITY` - Maximum cached responses (default: 500)
    /// - `CACHE_TTL` - Cached response lifetime in seconds (default: 300)
    /// - `UPSTREAM_BASE_URL` - Upstream API root (default: https://swapi.info/api/)
    /// - `UPSTREAM_TIMEOUT` - Upstream fetch timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Upstream timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cache_capacity: 500,
            cache_ttl: 300,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: 10,
        }
    }
}

/// Reads and parses an environment variable, ignoring unset or malformed values.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Ensures the base URL ends with exactly one `/` so paths can be appended.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}
