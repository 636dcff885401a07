//! Shared fixtures for the integration suites.
//!
//! The suites drive the real router via `tower::ServiceExt::oneshot`,
//! with the store and identity provider swapped for in-memory fakes.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;

use upe_api::config::cors::CorsConfig;
use upe_api::config::jwt::JwtConfig;
use upe_api::config::provider::ProviderConfig;
use upe_api::config::rate_limit::RateLimitConfig;
use upe_api::modules::users::model::{User, UserRole};
use upe_api::router::init_router;
use upe_api::state::AppState;
use upe_api::testing::{MemoryUserStore, StaticProvider};
use upe_api::utils::jwt::create_access_token;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-key-32-chars".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
        issuer: "upe-platform".to_string(),
        audience: "upe-users".to_string(),
    }
}

pub fn test_provider_config() -> ProviderConfig {
    ProviderConfig {
        issuer: None,
        audience: None,
        public_key_pem: None,
        api_url: "https://api.clerk.com/v1".to_string(),
        secret_key: String::new(),
        session_cookie: "__session".to_string(),
    }
}

/// Router over the given fakes with rate limits high enough to stay out of
/// the way.
pub fn build_app(store: Arc<MemoryUserStore>, provider: Arc<StaticProvider>) -> Router {
    build_app_with_rate_limit(
        store,
        provider,
        RateLimitConfig {
            auth_per_second: 1000,
            auth_burst_size: 1000,
        },
    )
}

pub fn build_app_with_rate_limit(
    store: Arc<MemoryUserStore>,
    provider: Arc<StaticProvider>,
    rate_limit_config: RateLimitConfig,
) -> Router {
    let state = AppState {
        store,
        provider,
        jwt_config: test_jwt_config(),
        provider_config: test_provider_config(),
        cors_config: CorsConfig {
            allowed_origins: vec![],
        },
        rate_limit_config,
    };

    init_router(state)
}

/// Mints a first-party access token for `user` with the suite's JWT config.
pub fn access_token_for(user: &User) -> String {
    create_access_token(user, &test_jwt_config()).unwrap()
}

/// Mints an already-expired first-party access token for `user`.
pub fn expired_access_token_for(user: &User) -> String {
    let mut config = test_jwt_config();
    config.access_token_expiry = -3600;
    create_access_token(user, &config).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// A verified user, for suites exercising `require_verified`.
pub fn verified_user(id: &str, email: &str, role: UserRole) -> User {
    let mut user = upe_api::testing::test_user(id, email, role);
    user.is_verified = true;
    user
}
