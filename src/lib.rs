//! SWAPI Proxy - A read-through caching reverse proxy
//!
//! Validates requests against a fixed set of Star Wars API resources and
//! serves them from a bounded, TTL-expiring FIFO cache, fetching from the
//! upstream on a miss.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::ProxyError;
