//! API Module
//!
//! HTTP handlers and routing for the proxy.
//!
//! # Endpoints
//! - `GET /` - Service info
//! - `GET /healthz` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `GET /api/swapi/{resource}[/{id}]` - Cached proxy to the upstream

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
