//! Proxy Forwarder
//!
//! Runs one request through validate → cache lookup → upstream fetch →
//! cache store → respond. Every step either advances or ends the request
//! with a single error; nothing is retried.

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::api::AppState;
use crate::cache::{CachedResponse, SharedCache};
use crate::error::{ProxyError, Result};
use crate::proxy::upstream::{UpstreamClient, DEFAULT_CONTENT_TYPE};
use crate::proxy::validator::validate_path;

/// Route prefix stripped before validation
pub const ROUTE_PREFIX: &str = "/api/swapi/";

/// Response header reporting whether the cache answered
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

// == Cache Status ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

// == Proxied Response ==
/// Outcome of a successful forward, ready to be written to the client.
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub response: CachedResponse,
    pub cache_status: CacheStatus,
}

impl IntoResponse for ProxiedResponse {
    fn into_response(self) -> Response {
        let CachedResponse {
            status,
            content_type,
            body,
        } = self.response;

        let content_type = HeaderValue::from_str(&content_type)
            .unwrap_or(HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        (
            status,
            [
                (header::CONTENT_TYPE, content_type),
                (X_CACHE, HeaderValue::from_static(self.cache_status.as_str())),
            ],
            body,
        )
            .into_response()
    }
}

// == Forwarder ==
/// Read-through proxy over one upstream, sharing a single cache.
#[derive(Debug, Clone)]
pub struct Forwarder {
    cache: SharedCache,
    upstream: UpstreamClient,
}

impl Forwarder {
    pub fn new(cache: SharedCache, upstream: UpstreamClient) -> Self {
        Self { cache, upstream }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }

    // == Forward ==
    /// Serves `path` (already stripped of [`ROUTE_PREFIX`]) from the cache or
    /// the upstream.
    ///
    /// No cache lock is held while the upstream call is in flight, so
    /// concurrent misses on the same key each fetch independently and the
    /// last store wins.
    pub async fn forward(&self, method: &Method, path: &str) -> Result<ProxiedResponse> {
        if *method != Method::GET {
            return Err(ProxyError::MethodNotAllowed(method.clone()));
        }

        let validated = validate_path(path)?;
        let target = self.upstream.target_url(&validated.as_upstream_path());

        if let Some(mut cached) = self.cache.get(&target).await {
            debug!(target = %target, "Cache hit");
            if cached.content_type.is_empty() {
                cached.content_type = DEFAULT_CONTENT_TYPE.to_string();
            }
            return Ok(ProxiedResponse {
                response: cached,
                cache_status: CacheStatus::Hit,
            });
        }

        debug!(target = %target, "Cache miss, forwarding upstream");
        let fetched = self
            .upstream
            .fetch(&target)
            .await
            .inspect_err(|e| {
                warn!(target = %target, error = %e, details = %e.details(), "Upstream fetch failed")
            })?;

        // Non-2xx responses are cached too so bad ids are not re-fetched.
        self.cache.set(target, fetched.clone()).await;

        Ok(ProxiedResponse {
            response: fetched,
            cache_status: CacheStatus::Miss,
        })
    }
}

// == Handler ==
/// Handler for any verb on `/api/swapi/` and below.
///
/// Registered for every method so that non-GET requests get the JSON
/// method-not-allowed body rather than the router's empty 405.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<ProxiedResponse> {
    let path = strip_route_prefix(uri.path());
    state.forwarder.forward(&method, path).await
}

/// Removes [`ROUTE_PREFIX`] and any leading slashes from a request path.
pub fn strip_route_prefix(path: &str) -> &str {
    path.strip_prefix(ROUTE_PREFIX)
        .unwrap_or(path)
        .trim_start_matches('/')
}
