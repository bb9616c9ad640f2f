//! Upstream HTTP client
//!
//! Thin wrapper over `reqwest` bound to one base URL and a fixed timeout.
//! Cancellation is structural: dropping the future returned by
//! [`UpstreamClient::fetch`] aborts the in-flight request, so a client
//! disconnect that drops the handler also drops the upstream call.

use std::time::Duration;

use axum::http::header;
use reqwest::{Client, Url};

use crate::cache::CachedResponse;
use crate::config::normalize_base_url;
use crate::error::{ProxyError, Result};

/// Content type assumed when neither the upstream nor the cache supplies one
pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

// == Upstream Client ==
/// HTTP client for the single read-only upstream service.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL, always ending with `/`.
    base_url: String,
}

impl UpstreamClient {
    /// Builds a client with the given base URL and per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Target ==
    /// Fully-qualified upstream URL for a validated relative path.
    ///
    /// An empty path maps to the bare base URL (the upstream's index).
    pub fn target_url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    // == Fetch ==
    /// Issues a GET to `url` and reads the whole body.
    ///
    /// Non-2xx statuses are not errors; they are returned like any other
    /// response so the caller can mirror and cache them.
    pub async fn fetch(&self, url: &str) -> Result<CachedResponse> {
        let url = Url::parse(url).map_err(|e| ProxyError::RequestBuild(e.to_string()))?;
        let request = self
            .http
            .get(url)
            .build()
            .map_err(|e| ProxyError::RequestBuild(e.to_string()))?;

        let response = self
            .http
            .execute(request)
            .await
            .map_err(ProxyError::UpstreamRequest)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let body = response.bytes().await.map_err(ProxyError::UpstreamRead)?;

        Ok(CachedResponse {
            status,
            content_type,
            body,
        })
    }
}
