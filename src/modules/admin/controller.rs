use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::UpdateRoleDto;
use super::service::AdminService;

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = AdminService::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// Change a user's role (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdateRoleDto>,
) -> Result<Json<User>, AppError> {
    let user = AdminService::set_role(state.store.as_ref(), &id, dto.role).await?;
    Ok(Json(user))
}
