//! Integration Tests for the proxy endpoints
//!
//! Drives the full router with `oneshot` against a local stub upstream so
//! that cache hits, misses and upstream failures can be observed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode, Uri},
    response::Response,
    Router,
};
use serde_json::Value;
use swapi_proxy::{cache::SharedCache, create_router, proxy::UpstreamClient, AppState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

// == Stub Upstream ==

/// Paths the stub upstream has been asked for, in order.
type RequestLog = Arc<Mutex<Vec<String>>>;

async fn stub_upstream(State(log): State<RequestLog>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    log.lock().unwrap().push(path.clone());

    let builder = Response::builder();
    match path.as_str() {
        "/api/" => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"people":"https://swapi.info/api/people"}"#)),
        "/api/people/1" => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Luke Skywalker"}"#)),
        "/api/films" => builder
            // No content type: the proxy must default to JSON
            .body(Body::from("[]")),
        "/api/starships/9" => builder
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from("<p>Death Star</p>")),
        "/api/planets/1" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            builder.body(Body::from("{}"))
        }
        _ => builder
            .status(StatusCode::NOT_FOUND)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"detail":"Not found"}"#)),
    }
    .unwrap()
}

/// Starts the stub on an ephemeral port and returns its base URL.
async fn spawn_upstream() -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(stub_upstream).with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/", addr), log)
}

// == Helper Functions ==

async fn create_test_app(capacity: usize, ttl: Duration) -> (Router, RequestLog) {
    let (base_url, log) = spawn_upstream().await;
    let upstream = UpstreamClient::new(&base_url, Duration::from_millis(500)).unwrap();
    let state = AppState::new(SharedCache::with_capacity(capacity, ttl), upstream);
    (create_router(state), log)
}

async fn send(app: &Router, method: &str, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn header_str<'a>(response: &'a Response, name: &str) -> &'a str {
    response.headers()[name].to_str().unwrap()
}

// == Read-through Caching ==

#[tokio::test]
async fn test_second_request_served_from_cache() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let first = send(&app, "GET", "/api/swapi/people/1").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(header_str(&first, "x-cache"), "MISS");
    assert_eq!(header_str(&first, "content-type"), "application/json");
    assert_eq!(body_bytes(first).await, br#"{"name":"Luke Skywalker"}"#);

    let second = send(&app, "GET", "/api/swapi/people/1").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(header_str(&second, "x-cache"), "HIT");
    assert_eq!(header_str(&second, "content-type"), "application/json");
    assert_eq!(body_bytes(second).await, br#"{"name":"Luke Skywalker"}"#);

    assert_eq!(*log.lock().unwrap(), vec!["/api/people/1".to_string()]);
}

#[tokio::test]
async fn test_root_maps_to_upstream_index() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/api/swapi/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.get("people").is_some());
    assert_eq!(*log.lock().unwrap(), vec!["/api/".to_string()]);
}

#[tokio::test]
async fn test_trailing_slash_shares_cache_entry() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    send(&app, "GET", "/api/swapi/people/1").await;
    let response = send(&app, "GET", "/api/swapi/people/1/").await;

    assert_eq!(header_str(&response, "x-cache"), "HIT");
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_content_type_defaults_to_json() {
    let (app, _log) = create_test_app(100, Duration::from_secs(300)).await;

    let miss = send(&app, "GET", "/api/swapi/films").await;
    assert_eq!(header_str(&miss, "content-type"), "application/json; charset=utf-8");

    let hit = send(&app, "GET", "/api/swapi/films").await;
    assert_eq!(header_str(&hit, "x-cache"), "HIT");
    assert_eq!(header_str(&hit, "content-type"), "application/json; charset=utf-8");
}

#[tokio::test]
async fn test_upstream_content_type_mirrored() {
    let (app, _log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/api/swapi/starships/9").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "content-type"), "text/html; charset=utf-8");
    assert_eq!(body_bytes(response).await, b"<p>Death Star</p>");
}

#[tokio::test]
async fn test_upstream_not_found_is_mirrored_and_cached() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let first = send(&app, "GET", "/api/swapi/people/999").await;
    assert_eq!(first.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(first).await["detail"], "Not found");

    let second = send(&app, "GET", "/api/swapi/people/999").await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(header_str(&second, "x-cache"), "HIT");

    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let (app, log) = create_test_app(100, Duration::from_millis(100)).await;

    send(&app, "GET", "/api/swapi/people/1").await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    let response = send(&app, "GET", "/api/swapi/people/1").await;

    assert_eq!(header_str(&response, "x-cache"), "MISS");
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_capacity_evicts_oldest_entry() {
    let (app, log) = create_test_app(2, Duration::from_secs(3600)).await;

    send(&app, "GET", "/api/swapi/people/1").await;
    send(&app, "GET", "/api/swapi/films").await;
    send(&app, "GET", "/api/swapi/starships/9").await;

    // films and starships are still cached, people/1 was evicted
    assert_eq!(header_str(&send(&app, "GET", "/api/swapi/films").await, "x-cache"), "HIT");
    assert_eq!(
        header_str(&send(&app, "GET", "/api/swapi/starships/9").await, "x-cache"),
        "HIT"
    );
    assert_eq!(
        header_str(&send(&app, "GET", "/api/swapi/people/1").await, "x-cache"),
        "MISS"
    );
    assert_eq!(log.lock().unwrap().len(), 4);
}

// == Validation ==

#[tokio::test]
async fn test_unknown_resource_rejected_without_upstream_call() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/api/swapi/spaceballs").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid resource");
    assert!(json["details"].as_str().unwrap().contains("people"));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/api/swapi/people/luke").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid id");
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_extra_segments_rejected() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/api/swapi/people/1/films").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid path");
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_get_methods_rejected_on_any_path() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    for method in ["POST", "PUT", "DELETE", "PATCH", "OPTIONS", "HEAD"] {
        for uri in ["/api/swapi/", "/api/swapi/people/1", "/api/swapi/spaceballs"] {
            let response = send(&app, method, uri).await;
            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{} {} should be rejected",
                method,
                uri
            );
            assert_eq!(header_str(&response, "allow"), "GET");
            // HEAD responses carry no body
            if method != "HEAD" {
                assert_eq!(body_json(response).await["error"], "method not allowed");
            }
        }
    }
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_preflight_on_proxy_is_rejected() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/swapi/people/1")
                .header(header::ORIGIN, "https://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    assert_eq!(body_json(response).await["error"], "method not allowed");
    assert!(log.lock().unwrap().is_empty());
}

// == Upstream Failures ==

#[tokio::test]
async fn test_upstream_timeout_is_bad_gateway() {
    let (app, _log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/api/swapi/planets/1").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "upstream request failed");
    assert!(json["details"].is_string());
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway_and_not_cached() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cache = SharedCache::with_capacity(100, Duration::from_secs(300));
    let upstream = UpstreamClient::new(&format!("http://{}/api/", addr), Duration::from_secs(1)).unwrap();
    let app = create_router(AppState::new(cache.clone(), upstream));

    let response = send(&app, "GET", "/api/swapi/people/1").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(cache.is_empty().await);

    // The process stays usable after a failed request
    let response = send(&app, "GET", "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_truncated_upstream_body_is_bad_gateway_and_not_cached() {
    // Raw socket upstream: promises 100 bytes, sends 3, then hangs up.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\nabc",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let cache = SharedCache::with_capacity(100, Duration::from_secs(300));
    let upstream = UpstreamClient::new(&format!("http://{}/api/", addr), Duration::from_secs(1)).unwrap();
    let app = create_router(AppState::new(cache.clone(), upstream));

    let response = send(&app, "GET", "/api/swapi/people/1").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "failed to read upstream response");
    assert!(json["details"].is_string());
    assert!(cache.is_empty().await);
}

// == Concurrency ==

#[tokio::test]
async fn test_concurrent_misses_all_reach_upstream() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(&app, "GET", "/api/swapi/people/1").await.status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    // No request coalescing: between 1 and 5 fetches depending on timing
    let fetches = log.lock().unwrap().len();
    assert!((1..=5).contains(&fetches));

    let response = send(&app, "GET", "/api/swapi/people/1").await;
    assert_eq!(header_str(&response, "x-cache"), "HIT");
}

// == Static Endpoints ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/healthz").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["time"].is_string());
}

#[tokio::test]
async fn test_info_endpoint() {
    let (app, _log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["name"].is_string());
    assert!(json["endpoints"].is_array());
}

#[tokio::test]
async fn test_stats_reflect_proxy_traffic() {
    let (app, _log) = create_test_app(100, Duration::from_secs(300)).await;

    send(&app, "GET", "/api/swapi/people/1").await; // miss
    send(&app, "GET", "/api/swapi/people/1").await; // hit
    send(&app, "GET", "/api/swapi/spaceballs").await; // rejected, no lookup

    let json = body_json(send(&app, "GET", "/stats").await).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_bare_prefix_redirects() {
    let (app, _log) = create_test_app(100, Duration::from_secs(300)).await;

    let response = send(&app, "GET", "/api/swapi").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(header_str(&response, "location"), "/api/swapi/");
}

#[tokio::test]
async fn test_bare_prefix_redirects_regardless_of_method() {
    let (app, log) = create_test_app(100, Duration::from_secs(300)).await;

    for method in ["POST", "PUT", "DELETE", "OPTIONS", "HEAD"] {
        let response = send(&app, method, "/api/swapi").await;
        assert_eq!(
            response.status(),
            StatusCode::MOVED_PERMANENTLY,
            "{} /api/swapi should redirect",
            method
        );
        assert_eq!(header_str(&response, "location"), "/api/swapi/");
    }
    assert!(log.lock().unwrap().is_empty());
}
