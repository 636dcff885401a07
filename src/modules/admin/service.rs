use crate::modules::users::model::{User, UserRole};
use crate::store::UserStore;
use crate::utils::errors::AppError;

pub struct AdminService;

impl AdminService {
    pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, AppError> {
        Ok(store.list().await?)
    }

    pub async fn set_role(
        store: &dyn UserStore,
        id: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        store
            .update_role(id, role)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
