use serde::Serialize;

use crate::modules::users::model::{User, UserRole};

/// The resolved caller of one request.
///
/// Constructed fresh per request by a resolver layer and discarded with it;
/// only the backing [`User`] record is durable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    /// Subject id asserted by the trust domain that authenticated the
    /// request.
    pub subject_id: String,
    /// Id of the backing user record. Equal to `subject_id` unless the
    /// account was matched by email during materialization.
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub verified: bool,
}

impl Principal {
    pub fn from_user(subject_id: impl Into<String>, user: &User) -> Self {
        Self {
            subject_id: subject_id.into(),
            user_id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            verified: user.is_verified,
        }
    }
}

/// Why a first-party credential was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Signature and claims were fine but the token is past its expiry.
    Expired,
    /// Malformed, tampered with, or wrong issuer/audience.
    Invalid,
    /// The token verified but no user record exists for its subject.
    /// First-party accounts are created through registration, never
    /// on the fly.
    UserNotFound,
}

/// Per-request identity resolution outcome.
///
/// Inserted into request extensions by a resolver layer. A rejection is
/// recorded here rather than raised: mandatory-auth guards surface it as a
/// 401 with the matching reason code, optional-auth handlers see it as
/// an absent principal.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestIdentity {
    /// No credential was supplied, or a failure was absorbed by the
    /// fail-open policy.
    Anonymous,
    Authenticated(Principal),
    Rejected(TokenRejection),
}

impl RequestIdentity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }
}
