use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CompanyProfileResponse, UpdateProfileDto, User};
use super::service::UserService;

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "The caller's profile", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_by_id(state.store.as_ref(), &principal.user_id).await?;
    Ok(Json(user))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_profile(state.store.as_ref(), &principal.user_id, dto).await?;
    Ok(Json(user))
}

/// Get the caller's company profile (verified empresa accounts only)
#[utoipa::path(
    get,
    path = "/api/users/company",
    responses(
        (status = 200, description = "Company profile", body = CompanyProfileResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Role not permitted or account not verified", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn company_profile(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<CompanyProfileResponse>, AppError> {
    let user = UserService::get_by_id(state.store.as_ref(), &principal.user_id).await?;
    Ok(Json(CompanyProfileResponse::from_user(user)))
}
