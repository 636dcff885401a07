//! Provider-path resolution through the full router: optional auth,
//! first-sight provisioning, email fallback, role reconciliation, and the
//! fail-open behavior on bad sessions and store outages.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use tower::ServiceExt;

use common::{build_app, get, get_with_bearer, get_with_cookie, response_json};
use upe_api::modules::users::model::UserRole;
use upe_api::testing::{MemoryUserStore, StaticProvider, session_claims, test_user};

#[tokio::test]
async fn test_optional_route_without_credential_proceeds_anonymously() {
    let store = Arc::new(MemoryUserStore::new());
    store.insert(test_user("s1", "s1@test.com", UserRole::Estudiante));
    let app = build_app(store, Arc::new(StaticProvider::new()));

    let response = app.oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["total_students"], 1);
    assert!(body.get("viewer").is_none());
}

#[tokio::test]
async fn test_optional_route_with_stale_session_proceeds_anonymously() {
    let store = Arc::new(MemoryUserStore::new());
    // Provider knows no sessions: any token behaves like an expired one.
    let app = build_app(store, Arc::new(StaticProvider::new()));

    let response = app
        .oneshot(get_with_cookie("/api/stats", "__session=stale-session"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body.get("viewer").is_none());
}

#[tokio::test]
async fn test_optional_route_personalizes_for_valid_session() {
    let store = Arc::new(MemoryUserStore::new());
    store.insert(test_user("user_1", "u1@test.com", UserRole::Empresa));
    let provider = Arc::new(
        StaticProvider::new().with_session("sess-1", session_claims("user_1", Some("u1@test.com"))),
    );
    let app = build_app(store, provider);

    let response = app
        .oneshot(get_with_cookie("/api/stats", "__session=sess-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["viewer"]["role"], "empresa");
}

#[tokio::test]
async fn test_session_cookie_and_bearer_both_authenticate() {
    let store = Arc::new(MemoryUserStore::new());
    store.insert(test_user("user_1", "u1@test.com", UserRole::Estudiante));
    let provider = Arc::new(
        StaticProvider::new().with_session("sess-1", session_claims("user_1", Some("u1@test.com"))),
    );
    let app = build_app(store.clone(), provider);

    let via_cookie = app
        .clone()
        .oneshot(get_with_cookie("/api/users/profile", "__session=sess-1"))
        .await
        .unwrap();
    assert_eq!(via_cookie.status(), StatusCode::OK);

    let via_bearer = app
        .oneshot(get_with_bearer("/api/users/profile", "sess-1"))
        .await
        .unwrap();
    assert_eq!(via_bearer.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_first_sight_provisions_a_record() {
    let store = Arc::new(MemoryUserStore::new());
    let mut claims = session_claims("user_new", Some("nuevo@test.com"));
    claims.name = Some("Nuevo Usuario".to_string());
    let provider = Arc::new(StaticProvider::new().with_session("sess-new", claims));
    let app = build_app(store.clone(), provider);

    let response = app
        .oneshot(get_with_cookie("/api/users/profile", "__session=sess-new"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], "user_new");
    assert_eq!(body["email"], "nuevo@test.com");
    assert_eq!(body["role"], "estudiante");

    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_email_match_keeps_existing_record_id() {
    let store = Arc::new(MemoryUserStore::new());
    store.insert(test_user(
        "registered-locally",
        "shared@test.com",
        UserRole::Estudiante,
    ));
    let provider = Arc::new(
        StaticProvider::new()
            .with_session("sess-p", session_claims("user_prov", Some("shared@test.com"))),
    );
    let app = build_app(store.clone(), provider);

    let response = app
        .oneshot(get_with_cookie("/api/users/profile", "__session=sess-p"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], "registered-locally");
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_role_claim_reconciles_stored_role() {
    let store = Arc::new(MemoryUserStore::new());
    store.insert(test_user("user_rc", "rc@test.com", UserRole::Estudiante));

    let mut claims = session_claims("user_rc", Some("rc@test.com"));
    claims.role = Some("empresa".to_string());
    let provider = Arc::new(StaticProvider::new().with_session("sess-rc", claims));
    let app = build_app(store.clone(), provider);

    let response = app
        .oneshot(get_with_cookie("/api/users/profile", "__session=sess-rc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["role"], "empresa");
    assert_eq!(store.get("user_rc").unwrap().role, UserRole::Empresa);
}

#[tokio::test]
async fn test_store_outage_degrades_to_anonymous_not_500() {
    let store = Arc::new(MemoryUserStore::new());
    store.insert(test_user("user_1", "u1@test.com", UserRole::Estudiante));
    let provider = Arc::new(
        StaticProvider::new().with_session("sess-1", session_claims("user_1", Some("u1@test.com"))),
    );
    let app = build_app(store.clone(), provider);
    store.set_unavailable();

    // Resolution fails open to anonymous; the mandatory-auth gate then
    // rejects with 401 rather than the request blowing up with a 5xx.
    let response = app
        .oneshot(get_with_cookie("/api/users/profile", "__session=sess-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_mandatory_provider_route_with_stale_session_is_401_not_authenticated() {
    let store = Arc::new(MemoryUserStore::new());
    let app = build_app(store, Arc::new(StaticProvider::new()));

    // Provider-path failures collapse to anonymous; the specific reason is
    // not surfaced, unlike the first-party path.
    let response = app
        .oneshot(get_with_cookie("/api/users/profile", "__session=stale"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], "NOT_AUTHENTICATED");
    assert_eq!(body["error"], "Authentication required");
}
