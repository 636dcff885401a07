//! User data models and DTOs.
//!
//! The [`User`] struct is the durable account record backing every resolved
//! identity, whether the account was provisioned from a provider session or
//! through first-party registration. [`UserRole`] is the platform's role
//! enum; its wire values are the Spanish names used by the frontend and by
//! role claims in both trust domains.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Account role.
///
/// Serialized (JSON and database) as the Spanish wire values:
/// `estudiante`, `empresa`, `admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Estudiante,
    Empresa,
    Admin,
}

impl UserRole {
    /// Parse a role claim as asserted by a trust domain.
    ///
    /// Unknown values yield `None` so that a malformed claim can be ignored
    /// rather than failing the whole resolution.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "estudiante" => Some(Self::Estudiante),
            "empresa" => Some(Self::Empresa),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Estudiante => "estudiante",
            Self::Empresa => "empresa",
            Self::Admin => "admin",
        }
    }
}

/// A user account.
///
/// `id` is an opaque string: the provider's subject id for accounts
/// provisioned from a provider session, or a generated UUID for accounts
/// created through first-party registration. Both `id` and `email` are
/// unique. `password_hash` is only present for first-party accounts and is
/// never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for updating the caller's own profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    #[validate(url)]
    pub picture: Option<String>,
}

/// Company-facing view of an `empresa` account.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyProfileResponse {
    pub id: String,
    pub company_name: Option<String>,
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub is_verified: bool,
}

impl CompanyProfileResponse {
    pub fn from_user(user: User) -> Self {
        Self {
            id: user.id,
            company_name: user.company_name,
            name: user.name,
            email: user.email,
            picture: user.picture,
            is_verified: user.is_verified,
        }
    }
}
