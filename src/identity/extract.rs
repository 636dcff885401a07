//! Credential extraction.
//!
//! Pulls a raw credential off the request before any verification happens.
//! Extraction never fails: a request without a credential proceeds as
//! anonymous, and it is up to the guards on the route to decide whether
//! that is acceptable.

use axum::http::{HeaderMap, header};
use axum_extra::extract::CookieJar;

/// A credential pulled off the request, before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCredential {
    Cookie(String),
    Bearer(String),
}

impl RawCredential {
    pub fn value(&self) -> &str {
        match self {
            Self::Cookie(value) | Self::Bearer(value) => value,
        }
    }
}

/// Extracts the provider session cookie or, failing that, a bearer token.
///
/// The cookie takes precedence: the provider's frontend SDK sets it on
/// same-site requests, while API clients send the bearer header.
pub fn extract_credential(headers: &HeaderMap, session_cookie: &str) -> Option<RawCredential> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(session_cookie) {
        let value = cookie.value();
        if !value.is_empty() {
            return Some(RawCredential::Cookie(value.to_string()));
        }
    }

    bearer_token(headers).map(RawCredential::Bearer)
}

/// Extracts a bearer token from the `Authorization` header.
///
/// First-party routes accept only this form; the session cookie belongs to
/// the provider trust domain.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
