//! Proxy Module
//!
//! Request validation, the upstream client and the read-through forwarder
//! that ties them to the cache.

pub mod forwarder;
pub mod upstream;
pub mod validator;

pub use forwarder::{proxy_handler, CacheStatus, Forwarder, ProxiedResponse, ROUTE_PREFIX};
pub use upstream::{UpstreamClient, DEFAULT_CONTENT_TYPE};
pub use validator::{validate_path, ValidatedPath, ALLOWED_RESOURCES};
