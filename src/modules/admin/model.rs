use serde::Deserialize;
use utoipa::ToSchema;

use crate::modules::users::model::UserRole;

/// DTO for changing a user's role from the admin dashboard.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRoleDto {
    pub role: UserRole,
}
