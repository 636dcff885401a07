//! Identity resolution layers.
//!
//! One middleware layer per trust domain; every route is statically bound
//! to exactly one of them in the router. Both layers attach a
//! [`RequestIdentity`] to the request and always let it through; rejecting
//! is the guards' job.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::identity::extract::{bearer_token, extract_credential};
use crate::identity::materialize::{materialize_local, materialize_session};
use crate::identity::principal::{RequestIdentity, TokenRejection};
use crate::state::AppState;
use crate::utils::jwt::{self, TokenError};

/// Resolver layer for provider-backed routes.
///
/// Verification or materialization failures here are absorbed into an
/// anonymous identity: a stale session or a provider hiccup turns the
/// caller into a guest, never into an error response.
pub async fn provider_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = resolve_provider_session(&state, req.headers()).await;
    req.extensions_mut().insert(identity);
    next.run(req).await
}

async fn resolve_provider_session(state: &AppState, headers: &HeaderMap) -> RequestIdentity {
    let Some(credential) = extract_credential(headers, &state.provider_config.session_cookie)
    else {
        return RequestIdentity::Anonymous;
    };

    let claims = match state.provider.verify_session(credential.value()) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Provider session rejected; continuing as anonymous");
            return RequestIdentity::Anonymous;
        }
    };

    match materialize_session(state.store.as_ref(), state.provider.as_ref(), &claims).await {
        Ok(principal) => RequestIdentity::Authenticated(principal),
        Err(e) => {
            warn!(subject = %claims.sub, error = %e, "Materialization failed; continuing as anonymous");
            RequestIdentity::Anonymous
        }
    }
}

/// Resolver layer for first-party routes.
///
/// Unlike the provider path, a presented-but-refused token is recorded as a
/// rejection so mandatory-auth guards can tell the client whether to
/// refresh (`TOKEN_EXPIRED`) or re-authenticate (`TOKEN_INVALID`).
pub async fn local_jwt(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let identity = resolve_local_jwt(&state, req.headers()).await;
    req.extensions_mut().insert(identity);
    next.run(req).await
}

async fn resolve_local_jwt(state: &AppState, headers: &HeaderMap) -> RequestIdentity {
    let Some(token) = bearer_token(headers) else {
        return RequestIdentity::Anonymous;
    };

    let claims = match jwt::verify_access_token(&token, &state.jwt_config) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => return RequestIdentity::Rejected(TokenRejection::Expired),
        Err(TokenError::Invalid) => return RequestIdentity::Rejected(TokenRejection::Invalid),
    };

    match materialize_local(state.store.as_ref(), &claims).await {
        Ok(Some(principal)) => RequestIdentity::Authenticated(principal),
        Ok(None) => RequestIdentity::Rejected(TokenRejection::UserNotFound),
        Err(e) => {
            warn!(subject = %claims.sub, error = %e, "User lookup failed; continuing as anonymous");
            RequestIdentity::Anonymous
        }
    }
}
