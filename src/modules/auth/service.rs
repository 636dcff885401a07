use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserRole};
use crate::store::{NewUser, StoreError, UserStore};
use crate::utils::errors::AppError;
use crate::utils::jwt::{
    TokenError, create_access_token, create_refresh_token, verify_refresh_token,
};
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequestDto,
};

fn invalid_credentials() -> AppError {
    AppError::unauthorized(anyhow::anyhow!("Invalid email or password"))
}

pub struct AuthService;

impl AuthService {
    pub async fn register(
        store: &dyn UserStore,
        dto: RegisterRequestDto,
    ) -> Result<User, AppError> {
        let role = match dto.role {
            None => UserRole::Estudiante,
            Some(UserRole::Admin) => {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Admin accounts cannot be self-registered"
                )));
            }
            Some(role) => role,
        };

        if store.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let password_hash = hash_password(&dto.password)?;
        let new_user = NewUser {
            id: Uuid::new_v4().to_string(),
            email: dto.email,
            name: dto.name,
            picture: None,
            role,
            is_verified: false,
            password_hash: Some(password_hash),
        };

        match store.create(new_user).await {
            Ok(user) => Ok(user),
            // Two concurrent registrations for the same email: the later one
            // reports the same error as the pre-check.
            Err(StoreError::UniqueViolation) => Err(AppError::bad_request(anyhow::anyhow!(
                "Email already registered"
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn login(
        store: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = store
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        // Provider-managed accounts have no local password and cannot log
        // in through this endpoint.
        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, password_hash)? {
            return Err(invalid_credentials());
        }

        let access_token = create_access_token(&user, jwt_config)?;
        let refresh_token = create_refresh_token(&user, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user,
        })
    }

    pub async fn refresh(
        store: &dyn UserStore,
        dto: RefreshRequest,
        jwt_config: &JwtConfig,
    ) -> Result<RefreshResponse, AppError> {
        let claims = verify_refresh_token(&dto.refresh_token, jwt_config).map_err(|e| match e {
            TokenError::Expired => AppError::unauthorized(anyhow::anyhow!("Refresh token expired"))
                .with_code("TOKEN_EXPIRED"),
            TokenError::Invalid => AppError::unauthorized(anyhow::anyhow!("Invalid refresh token"))
                .with_code("TOKEN_INVALID"),
        })?;

        // Role and verification state are re-read from the record so a
        // refreshed access token reflects them as of now, not login time.
        let user = store.find_by_id(&claims.sub).await?.ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("User not found")).with_code("NOT_AUTHENTICATED")
        })?;

        let access_token = create_access_token(&user, jwt_config)?;
        Ok(RefreshResponse { access_token })
    }
}
