//! Integration tests for the health endpoint and per-client rate limiting.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use server_core::kernel::test_dependencies::{MemoryUserStore, TestDependencies};

#[tokio::test]
async fn test_health_reports_healthy() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["status"], "ok");
    assert!(body["storage"].get("error").is_none());
}

#[tokio::test]
async fn test_health_reports_storage_outage() {
    let deps = TestDependencies::new().mock_users(MemoryUserStore::new().with_ping_failure());
    let app = TestApp::with_deps(deps);

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = response_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["storage"]["status"], "error");
    assert!(body["storage"]["error"].as_str().is_some());
}

#[tokio::test]
async fn test_rapid_client_is_throttled() {
    let app = TestApp::new();

    // The limiter allows a burst of 20 per client address, then throttles
    let mut throttled = 0;
    for i in 0..30 {
        let response = app.get("/health").await;
        if i == 0 {
            assert_eq!(response.status(), StatusCode::OK);
        }
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            throttled += 1;
        }
    }
    assert!(throttled > 0, "burst of 30 should trip the rate limit");

    // A different client address is unaffected
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-forwarded-for", "198.51.100.9")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
}
