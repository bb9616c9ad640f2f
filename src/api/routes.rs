//! API Routes
//!
//! Configures the Axum router with the proxy and its static endpoints.

use axum::{
    http::Method,
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::handlers::{
    health_handler, info_handler, redirect_to_proxy_root, stats_handler, AppState,
};
use crate::proxy::proxy_handler;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service info
/// - `GET /healthz` - Health check endpoint
/// - `GET /stats` - Cache statistics
/// - `/api/swapi` - Redirects to `/api/swapi/` (any method)
/// - `GET /api/swapi/{resource}[/{id}]` - Cached proxy to the upstream
///
/// # Middleware
/// - CORS: Any origin, GET only, on the static endpoints. The proxy routes
///   carry no CORS layer so every non-GET verb, OPTIONS included, gets 405.
/// - Tracing: One span per request, response status and latency at INFO
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let static_routes = Router::new()
        .route("/", get(info_handler))
        .route("/healthz", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(cors);

    let proxy_routes = Router::new()
        .route("/api/swapi", any(redirect_to_proxy_root))
        .route("/api/swapi/", any(proxy_handler))
        .route("/api/swapi/*path", any(proxy_handler));

    Router::new()
        .merge(static_routes)
        .merge(proxy_routes)
        .layer(trace)
        .with_state(state)
}
