//! Test doubles for the injected dependencies.
//!
//! The resolver takes its store and provider as trait objects, so the unit
//! and integration suites run the real pipeline against these fakes instead
//! of Postgres and the identity provider. Compiled for unit tests and, via
//! the `test-utils` feature, for the integration suites.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::identity::provider::{IdentityProvider, ProviderError, ProviderProfile, SessionClaims};
use crate::modules::users::model::{User, UserRole};
use crate::store::{NewUser, ProfileChanges, StoreError, UserStore};

/// In-memory [`UserStore`] with the same uniqueness semantics as the
/// Postgres implementation.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    unavailable: AtomicBool,
    skip_next_email_lookup: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// All subsequent calls fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    /// Makes the next `find_by_email` miss, simulating a lookup that ran
    /// before a concurrent request inserted the record.
    pub fn fail_next_find_by_email_with_none(&self) {
        self.skip_next_email_lookup.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(anyhow::anyhow!("store offline")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        if self.skip_next_email_lookup.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|user| user.id == new_user.id || user.email == new_user.email)
        {
            return Err(StoreError::UniqueViolation);
        }

        let now = Utc::now();
        let user = User {
            id: new_user.id,
            email: new_user.email,
            name: new_user.name,
            picture: new_user.picture,
            role: new_user.role,
            is_verified: new_user.is_verified,
            password_hash: new_user.password_hash,
            bio: None,
            company_name: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_role(&self, id: &str, role: UserRole) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.role = role;
                user.updated_at = Utc::now();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update_profile(
        &self,
        id: &str,
        changes: ProfileChanges,
    ) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                if let Some(name) = changes.name {
                    user.name = name;
                }
                if let Some(bio) = changes.bio {
                    user.bio = Some(bio);
                }
                if let Some(company_name) = changes.company_name {
                    user.company_name = Some(company_name);
                }
                if let Some(picture) = changes.picture {
                    user.picture = Some(picture);
                }
                user.updated_at = Utc::now();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count_by_role(&self, role: UserRole) -> Result<i64, StoreError> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|user| user.role == role)
            .count() as i64)
    }
}

/// Canned [`IdentityProvider`]: sessions and profiles are fixed at
/// construction; unknown tokens fail verification like stale real sessions.
#[derive(Default)]
pub struct StaticProvider {
    sessions: Mutex<HashMap<String, SessionClaims>>,
    profiles: Mutex<HashMap<String, ProviderProfile>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session token that verifies to the given claims.
    pub fn with_session(self, token: &str, claims: SessionClaims) -> Self {
        self.sessions
            .lock()
            .unwrap()
            .insert(token.to_string(), claims);
        self
    }

    /// Registers a provider-side profile for a subject.
    pub fn with_profile(
        self,
        subject_id: &str,
        email: Option<&str>,
        name: &str,
        role: Option<&str>,
        email_verified: bool,
    ) -> Self {
        self.profiles.lock().unwrap().insert(
            subject_id.to_string(),
            ProviderProfile {
                email: email.map(str::to_string),
                name: name.to_string(),
                picture: None,
                role: role.map(str::to_string),
                email_verified,
            },
        );
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticProvider {
    fn verify_session(&self, token: &str) -> Result<SessionClaims, ProviderError> {
        self.sessions
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| ProviderError::Verification("unknown or expired session".to_string()))
    }

    async fn fetch_user(&self, subject_id: &str) -> Result<ProviderProfile, ProviderError> {
        self.profiles
            .lock()
            .unwrap()
            .get(subject_id)
            .cloned()
            .ok_or_else(|| ProviderError::Unreachable("no such user".to_string()))
    }
}

/// Session claims with sensible defaults for tests.
pub fn session_claims(sub: &str, email: Option<&str>) -> SessionClaims {
    SessionClaims {
        sub: sub.to_string(),
        exp: 9999999999,
        email: email.map(str::to_string),
        name: None,
        role: None,
        email_verified: None,
    }
}

/// A minimal unverified user record for tests.
pub fn test_user(id: &str, email: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: id.to_string(),
        email: email.to_string(),
        name: "Test User".to_string(),
        picture: None,
        role,
        is_verified: false,
        password_hash: None,
        bio: None,
        company_name: None,
        created_at: now,
        updated_at: now,
    }
}
