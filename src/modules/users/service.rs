use crate::store::{ProfileChanges, UserStore};
use crate::utils::errors::AppError;

use super::model::{UpdateProfileDto, User};

pub struct UserService;

impl UserService {
    pub async fn get_by_id(store: &dyn UserStore, id: &str) -> Result<User, AppError> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    pub async fn update_profile(
        store: &dyn UserStore,
        id: &str,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let changes = ProfileChanges {
            name: dto.name,
            bio: dto.bio,
            company_name: dto.company_name,
            picture: dto.picture,
        };

        store
            .update_profile(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::modules::users::model::UserRole;
    use crate::testing::{MemoryUserStore, test_user};

    #[tokio::test]
    async fn test_update_profile_partial() {
        let store = MemoryUserStore::new();
        store.insert(test_user("u1", "u1@test.com", UserRole::Empresa));

        let updated = UserService::update_profile(
            &store,
            "u1",
            UpdateProfileDto {
                name: None,
                bio: Some("We hire juniors".to_string()),
                company_name: Some("Acme Py".to_string()),
                picture: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Test User");
        assert_eq!(updated.bio.as_deref(), Some("We hire juniors"));
        assert_eq!(updated.company_name.as_deref(), Some("Acme Py"));
    }

    #[tokio::test]
    async fn test_update_profile_unknown_user_is_not_found() {
        let store = MemoryUserStore::new();
        let err = UserService::update_profile(
            &store,
            "missing",
            UpdateProfileDto {
                name: Some("X".to_string()),
                bio: None,
                company_name: None,
                picture: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
