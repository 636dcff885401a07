//! Authentication extractors.
//!
//! Both extractors read the [`RequestIdentity`] attached by a resolver
//! layer. [`CurrentUser`] is the mandatory-auth gate for handlers;
//! [`MaybeUser`] is the optional-auth form and never rejects.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::identity::principal::{Principal, RequestIdentity};
use crate::middleware::guards::{AuthError, check_authenticated};

/// Extractor providing the authenticated caller, rejecting with a
/// machine-readable 401 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .unwrap_or(RequestIdentity::Anonymous);

        let principal = check_authenticated(&identity)?;
        Ok(CurrentUser(principal.clone()))
    }
}

/// Extractor for optional-auth handlers.
///
/// Anonymous callers and refused credentials both surface as `None`; the
/// handler runs either way.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Principal>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<RequestIdentity>()
            .and_then(|identity| identity.principal().cloned());

        Ok(MaybeUser(principal))
    }
}
