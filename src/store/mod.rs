//! Durable user storage.
//!
//! The [`UserStore`] trait is the storage seam for everything that touches
//! user records: identity materialization, first-party auth, profile
//! management, and the admin surface. The production implementation is
//! [`PgUserStore`]; tests substitute an in-memory fake.

use std::fmt;

use async_trait::async_trait;

use crate::modules::users::model::{User, UserRole};

pub mod postgres;

pub use postgres::PgUserStore;

/// Error from the user store.
#[derive(Debug)]
pub enum StoreError {
    /// A unique constraint (id or email) was violated on create. Callers
    /// racing on first-sight provisioning treat this as "someone else won"
    /// and re-read instead of failing.
    UniqueViolation,
    /// The store could not serve the request.
    Unavailable(anyhow::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniqueViolation => write!(f, "unique constraint violation"),
            Self::Unavailable(e) => write!(f, "user store unavailable: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Fields for creating a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    pub password_hash: Option<String>,
}

/// Changes applied to a user's own profile. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub picture: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Creates a record. Fails with [`StoreError::UniqueViolation`] when the
    /// id or email already exists.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Sets the role of an existing record. Returns `None` when no record
    /// with that id exists.
    async fn update_role(&self, id: &str, role: UserRole) -> Result<Option<User>, StoreError>;

    /// Applies profile changes to an existing record. Returns `None` when no
    /// record with that id exists.
    async fn update_profile(
        &self,
        id: &str,
        changes: ProfileChanges,
    ) -> Result<Option<User>, StoreError>;

    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn count_by_role(&self, role: UserRole) -> Result<i64, StoreError>;
}
