//! CLI commands.
//!
//! Admin accounts are never created through the API; the `create-admin`
//! command in `main.rs` is the only way to provision one.

use uuid::Uuid;

use crate::modules::users::model::{User, UserRole};
use crate::store::{NewUser, StoreError, UserStore};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

pub async fn create_admin(
    store: &dyn UserStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let password_hash = hash_password(password)?;

    let new_user = NewUser {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: name.to_string(),
        picture: None,
        role: UserRole::Admin,
        is_verified: true,
        password_hash: Some(password_hash),
    };

    match store.create(new_user).await {
        Ok(user) => Ok(user),
        Err(StoreError::UniqueViolation) => Err(AppError::bad_request(anyhow::anyhow!(
            "A user with that email already exists"
        ))),
        Err(e) => Err(e.into()),
    }
}
