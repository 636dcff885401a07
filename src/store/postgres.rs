//! PostgreSQL-backed [`UserStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use crate::modules::users::model::{User, UserRole};
use crate::store::{NewUser, ProfileChanges, StoreError, UserStore};

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_db_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::UniqueViolation,
        _ => StoreError::Unavailable(err.into()),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, picture, role, is_verified, password_hash, bio, \
             company_name, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, picture, role, is_verified, password_hash, bio, \
             company_name, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, name, picture, role, is_verified, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, email, name, picture, role, is_verified, password_hash, bio, \
             company_name, created_at, updated_at",
        )
        .bind(&new_user.id)
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.picture)
        .bind(new_user.role)
        .bind(new_user.is_verified)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn update_role(&self, id: &str, role: UserRole) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, email, name, picture, role, is_verified, password_hash, bio, \
             company_name, created_at, updated_at",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn update_profile(
        &self,
        id: &str,
        changes: ProfileChanges,
    ) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
             name = COALESCE($2, name), \
             bio = COALESCE($3, bio), \
             company_name = COALESCE($4, company_name), \
             picture = COALESCE($5, picture), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, email, name, picture, role, is_verified, password_hash, bio, \
             company_name, created_at, updated_at",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.bio)
        .bind(&changes.company_name)
        .bind(&changes.picture)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, name, picture, role, is_verified, password_hash, bio, \
             company_name, created_at, updated_at \
             FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn count_by_role(&self, role: UserRole) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
