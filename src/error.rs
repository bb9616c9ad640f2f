//! Error types for the proxy
//!
//! Provides unified error handling using thiserror. Every variant renders as
//! a JSON `{"error", "details"}` body with a matching status code.

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the proxy pipeline.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Request used a verb other than GET
    #[error("method not allowed")]
    MethodNotAllowed(Method),

    /// First path segment is not an allowed resource
    #[error("invalid resource")]
    InvalidResource(String),

    /// Second path segment is not numeric
    #[error("invalid id")]
    InvalidId(String),

    /// Path has more segments than `{resource}/{id}`
    #[error("invalid path")]
    InvalidPath(String),

    /// Outbound request could not be constructed
    #[error("failed to build upstream request")]
    RequestBuild(String),

    /// Connecting to or exchanging with the upstream failed
    #[error("upstream request failed")]
    UpstreamRequest(#[source] reqwest::Error),

    /// Upstream body could not be read to completion
    #[error("failed to read upstream response")]
    UpstreamRead(#[source] reqwest::Error),
}

impl ProxyError {
    // == Status Code ==
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::InvalidResource(_)
            | ProxyError::InvalidId(_)
            | ProxyError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ProxyError::RequestBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::UpstreamRequest(_) | ProxyError::UpstreamRead(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    // == Details ==
    /// Human-readable detail for the `details` field of the error body.
    pub fn details(&self) -> String {
        match self {
            ProxyError::MethodNotAllowed(method) => {
                format!("only GET is supported, got {}", method)
            }
            ProxyError::InvalidResource(resource) => format!(
                "'{}' is not one of: people, films, planets, species, starships, vehicles",
                resource
            ),
            ProxyError::InvalidId(id) => format!("id must be numeric, got '{}'", id),
            ProxyError::InvalidPath(path) => {
                format!("expected /{{resource}} or /{{resource}}/{{id}}, got '/{}'", path)
            }
            ProxyError::RequestBuild(reason) => reason.clone(),
            ProxyError::UpstreamRequest(err) | ProxyError::UpstreamRead(err) => err.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string(), self.details()));

        let mut response = (status, body).into_response();
        if matches!(self, ProxyError::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
