//! Per-IP rate limiting on the auth surface.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::build_app_with_rate_limit;
use upe_api::config::rate_limit::RateLimitConfig;
use upe_api::testing::{MemoryUserStore, StaticProvider};

fn strict_config() -> RateLimitConfig {
    RateLimitConfig {
        auth_per_second: 1,
        auth_burst_size: 1,
    }
}

fn login_request(ip: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": "test@example.com",
                "password": "password123"
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_auth_rate_limit_exceeded() {
    let app = build_app_with_rate_limit(
        Arc::new(MemoryUserStore::new()),
        Arc::new(StaticProvider::new()),
        strict_config(),
    );

    // First request is processed (401: unknown account), second is cut off.
    let first = app.clone().oneshot(login_request("192.168.1.100")).await.unwrap();
    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

    let second = app.oneshot(login_request("192.168.1.100")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limit_is_per_client_ip() {
    let app = build_app_with_rate_limit(
        Arc::new(MemoryUserStore::new()),
        Arc::new(StaticProvider::new()),
        strict_config(),
    );

    let first = app.clone().oneshot(login_request("10.0.0.1")).await.unwrap();
    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

    // A different client is not affected by the first one's budget.
    let other = app.oneshot(login_request("10.0.0.2")).await.unwrap();
    assert_eq!(other.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_auth_routes_are_not_rate_limited() {
    let app = build_app_with_rate_limit(
        Arc::new(MemoryUserStore::new()),
        Arc::new(StaticProvider::new()),
        strict_config(),
    );

    for _ in 0..5 {
        let request = Request::builder()
            .method("GET")
            .uri("/api/stats")
            .header("x-forwarded-for", "10.0.0.9")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
