//! Per-IP rate limiting for the auth endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, RateLimiter};
use serde_json::json;

use crate::config::rate_limit::RateLimitConfig;

pub type AuthRateLimiter = Arc<DefaultKeyedRateLimiter<String>>;

pub fn auth_rate_limiter(config: &RateLimitConfig) -> AuthRateLimiter {
    Arc::new(RateLimiter::keyed(config.auth_quota()))
}

/// Keys on `X-Forwarded-For` first (the API sits behind a proxy in
/// production), then the socket peer address.
fn client_key(req: &Request) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit(limiter: AuthRateLimiter, req: Request, next: Next) -> Response {
    let key = client_key(&req);
    if limiter.check_key(&key).is_err() {
        let body = Json(json!({ "error": "Too many requests" }));
        return (StatusCode::TOO_MANY_REQUESTS, body).into_response();
    }

    next.run(req).await
}
