//! Authorization gates.
//!
//! Guards are pure predicates over the resolved [`RequestIdentity`],
//! composed explicitly and evaluated in declared order. They are the only
//! place in the identity pipeline allowed to terminate a request: every
//! failure upstream of them resolves to an anonymous identity instead.

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::identity::principal::{Principal, RequestIdentity, TokenRejection};
use crate::modules::users::model::UserRole;

/// Authorization failure, with a machine-readable reason code.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    NotAuthenticated { message: &'static str },
    TokenExpired,
    TokenInvalid,
    RoleNotPermitted { allowed: Vec<UserRole> },
    NotVerified,
}

impl AuthError {
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            message: "Authentication required",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated { .. } => "NOT_AUTHENTICATED",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::RoleNotPermitted { .. } => "ROLE_NOT_PERMITTED",
            Self::NotVerified => "NOT_VERIFIED",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated { .. } | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            Self::RoleNotPermitted { .. } | Self::NotVerified => StatusCode::FORBIDDEN,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotAuthenticated { message } => (*message).to_string(),
            Self::TokenExpired => "Token expired".to_string(),
            Self::TokenInvalid => "Invalid token".to_string(),
            Self::RoleNotPermitted { allowed } => {
                let roles: Vec<&str> = allowed.iter().map(UserRole::as_wire).collect();
                format!("Access denied. Allowed roles: {}", roles.join(", "))
            }
            Self::NotVerified => "Account not verified".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.message(),
            "code": self.code(),
        });

        if let Self::RoleNotPermitted { allowed } = &self {
            body["allowed_roles"] =
                json!(allowed.iter().map(UserRole::as_wire).collect::<Vec<_>>());
        }

        (self.status(), Json(body)).into_response()
    }
}

/// Passes iff the identity resolved to a principal. A recorded first-party
/// token rejection surfaces here with its specific reason code.
pub fn check_authenticated(identity: &RequestIdentity) -> Result<&Principal, AuthError> {
    match identity {
        RequestIdentity::Authenticated(principal) => Ok(principal),
        RequestIdentity::Anonymous => Err(AuthError::not_authenticated()),
        RequestIdentity::Rejected(TokenRejection::Expired) => Err(AuthError::TokenExpired),
        RequestIdentity::Rejected(TokenRejection::Invalid) => Err(AuthError::TokenInvalid),
        RequestIdentity::Rejected(TokenRejection::UserNotFound) => Err(AuthError::NotAuthenticated {
            message: "User not found",
        }),
    }
}

/// Passes iff the principal's role is in the allowed set.
pub fn check_role(principal: &Principal, allowed: &[UserRole]) -> Result<(), AuthError> {
    if allowed.contains(&principal.role) {
        Ok(())
    } else {
        Err(AuthError::RoleNotPermitted {
            allowed: allowed.to_vec(),
        })
    }
}

/// Passes iff the principal's account is verified.
pub fn check_verified(principal: &Principal) -> Result<(), AuthError> {
    if principal.verified {
        Ok(())
    } else {
        Err(AuthError::NotVerified)
    }
}

fn request_identity(req: &Request) -> RequestIdentity {
    req.extensions()
        .get::<RequestIdentity>()
        .cloned()
        .unwrap_or(RequestIdentity::Anonymous)
}

/// Middleware requiring the caller to hold one of the allowed roles.
///
/// # Usage with `axum::middleware::from_fn`
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/users", get(list_users))
///     .route_layer(middleware::from_fn(require_admin));
/// ```
pub async fn require_roles(
    req: Request,
    next: Next,
    allowed: Vec<UserRole>,
) -> Result<Response, AuthError> {
    let identity = request_identity(&req);
    let principal = check_authenticated(&identity)?;
    check_role(principal, &allowed)?;
    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    match require_roles(req, next, vec![UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_empresa(req: Request, next: Next) -> Response {
    match require_roles(req, next, vec![UserRole::Empresa]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Middleware requiring an authenticated, verified account.
pub async fn require_verified(req: Request, next: Next) -> Result<Response, AuthError> {
    let identity = request_identity(&req);
    let principal = check_authenticated(&identity)?;
    check_verified(principal)?;
    Ok(next.run(req).await)
}
