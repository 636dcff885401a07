//! Identity materialization.
//!
//! Maps a verified subject onto a durable user record. The provider path
//! provisions a record on first sight; the first-party path only looks up
//! records created through registration.

use std::fmt;

use crate::identity::principal::Principal;
use crate::identity::provider::{IdentityProvider, ProviderError, SessionClaims};
use crate::modules::users::model::{User, UserRole};
use crate::store::{NewUser, StoreError, UserStore};
use crate::utils::jwt::Claims;

#[derive(Debug)]
pub enum MaterializeError {
    Store(StoreError),
    Provider(ProviderError),
    /// Neither the session claims nor the provider profile carried an
    /// email; the schema requires one.
    MissingEmail,
}

impl fmt::Display for MaterializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{}", e),
            Self::Provider(e) => write!(f, "{}", e),
            Self::MissingEmail => write!(f, "provider supplied no email for subject"),
        }
    }
}

impl std::error::Error for MaterializeError {}

impl From<StoreError> for MaterializeError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ProviderError> for MaterializeError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

/// Ensures a durable record exists for a verified provider subject and
/// returns the principal for this request.
///
/// Lookup order: by subject id, then by email (an email match keeps the
/// existing record and its id, since other rows may reference it), then
/// create.
/// A unique-violation on create means a concurrent request provisioned the
/// same account first; the record is re-read instead of failing, which
/// makes materialization idempotent under races.
pub async fn materialize_session(
    store: &dyn UserStore,
    provider: &dyn IdentityProvider,
    claims: &SessionClaims,
) -> Result<Principal, MaterializeError> {
    let mut role_claim = claims.role.as_deref().and_then(UserRole::from_wire);

    let user = match store.find_by_id(&claims.sub).await? {
        Some(user) => user,
        None => {
            // First sight of this subject. Derive a profile from the session
            // claims, falling back to the provider API when they are
            // incomplete.
            let (email, name, picture, verified) = match &claims.email {
                Some(email) => (
                    email.clone(),
                    claims.name.clone().unwrap_or_else(|| email.clone()),
                    None,
                    claims.email_verified.unwrap_or(false),
                ),
                None => {
                    let profile = provider.fetch_user(&claims.sub).await?;
                    if role_claim.is_none() {
                        role_claim = profile.role.as_deref().and_then(UserRole::from_wire);
                    }
                    let email = profile.email.ok_or(MaterializeError::MissingEmail)?;
                    (email, profile.name, profile.picture, profile.email_verified)
                }
            };

            match store.find_by_email(&email).await? {
                Some(existing) => existing,
                None => {
                    let new_user = NewUser {
                        id: claims.sub.clone(),
                        email: email.clone(),
                        name,
                        picture,
                        role: role_claim.unwrap_or(UserRole::Estudiante),
                        is_verified: verified,
                        password_hash: None,
                    };

                    match store.create(new_user).await {
                        Ok(user) => user,
                        // Lost a provisioning race: another request created
                        // the record between our lookup and our insert.
                        Err(StoreError::UniqueViolation) => store
                            .find_by_email(&email)
                            .await?
                            .ok_or(MaterializeError::Store(StoreError::UniqueViolation))?,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }
    };

    let user = reconcile_role(store, user, role_claim).await?;
    Ok(Principal::from_user(claims.sub.clone(), &user))
}

/// The trust domain is the source of truth for role: when a role claim
/// disagrees with the stored record, the store is updated to match and the
/// principal carries the new role.
async fn reconcile_role(
    store: &dyn UserStore,
    mut user: User,
    role_claim: Option<UserRole>,
) -> Result<User, MaterializeError> {
    let Some(claimed) = role_claim else {
        return Ok(user);
    };
    if claimed == user.role {
        return Ok(user);
    }

    match store.update_role(&user.id, claimed).await? {
        Some(updated) => Ok(updated),
        None => {
            // Record deleted mid-request; the claim still wins for the
            // lifetime of this request.
            user.role = claimed;
            Ok(user)
        }
    }
}

/// First-party path: the subject must already have a record. Accounts in
/// this trust domain are created through registration, never provisioned
/// here.
pub async fn materialize_local(
    store: &dyn UserStore,
    claims: &Claims,
) -> Result<Option<Principal>, StoreError> {
    Ok(store
        .find_by_id(&claims.sub)
        .await?
        .map(|user| Principal::from_user(claims.sub.clone(), &user)))
}
