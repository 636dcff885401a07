use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::identity::resolver;
use crate::logging::logging_middleware;
use crate::middleware::guards::require_admin;
use crate::middleware::rate_limit::{auth_rate_limiter, rate_limit};
use crate::modules::admin::router::init_admin_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::stats::router::init_stats_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Builds the application router.
///
/// Every `/api` subrouter is bound to exactly one trust domain by layering
/// the matching resolver: first-party JWTs for `/auth` and `/admin`,
/// provider sessions for `/users` and `/stats`. Guards sit inside the
/// resolver layer so they always see a resolved identity.
pub fn init_router(state: AppState) -> Router {
    let auth_limiter = auth_rate_limiter(&state.rate_limit_config);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router()
                        .layer(middleware::from_fn_with_state(
                            state.clone(),
                            resolver::local_jwt,
                        ))
                        .layer(middleware::from_fn(
                            move |req: axum::extract::Request, next: middleware::Next| {
                                let limiter = auth_limiter.clone();
                                async move { rate_limit(limiter, req, next).await }
                            },
                        )),
                )
                .nest(
                    "/users",
                    init_users_router().layer(middleware::from_fn_with_state(
                        state.clone(),
                        resolver::provider_session,
                    )),
                )
                .nest(
                    "/stats",
                    init_stats_router().layer(middleware::from_fn_with_state(
                        state.clone(),
                        resolver::provider_session,
                    )),
                )
                .nest(
                    "/admin",
                    init_admin_router()
                        .route_layer(middleware::from_fn(require_admin))
                        .layer(middleware::from_fn_with_state(
                            state.clone(),
                            resolver::local_jwt,
                        )),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
