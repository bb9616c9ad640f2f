//! API Handlers
//!
//! Static responders and shared application state. The proxy handler
//! itself lives in [`crate::proxy::forwarder`].

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::models::{HealthResponse, InfoResponse, StatsResponse};
use crate::proxy::{Forwarder, UpstreamClient, ROUTE_PREFIX};

/// Application state shared across all handlers.
///
/// Holds the one process-wide cache, injected through the forwarder.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-through proxy and the cache it owns
    pub forwarder: Forwarder,
}

impl AppState {
    /// Creates a new AppState from an existing cache and upstream client.
    pub fn new(cache: SharedCache, upstream: UpstreamClient) -> Self {
        Self {
            forwarder: Forwarder::new(cache, upstream),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let cache = SharedCache::with_capacity(config.cache_capacity, config.cache_ttl());
        let upstream = UpstreamClient::new(&config.upstream_base_url, config.upstream_timeout())?;
        Ok(Self::new(cache, upstream))
    }
}

/// Handler for GET /
///
/// Describes the service and its endpoints.
pub async fn info_handler() -> Json<InfoResponse> {
    Json(InfoResponse::current())
}

/// Handler for GET /healthz
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.forwarder.cache().stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for /api/swapi without the trailing slash.
///
/// Answers with a 301 to the prefixed root.
pub async fn redirect_to_proxy_root() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, ROUTE_PREFIX)],
    )
}
