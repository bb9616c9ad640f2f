//! Response models for the proxy's own endpoints
//!
//! Upstream payloads are forwarded as raw bytes and never modelled here.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, InfoResponse, StatsResponse, SERVICE_NAME};
