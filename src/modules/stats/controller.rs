use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::auth::MaybeUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::StatsResponse;
use super::service::StatsService;

/// Platform stats; personalized when the caller is authenticated
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Platform stats", body = StatsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Stats"
)]
#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    MaybeUser(principal): MaybeUser,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = StatsService::overview(state.store.as_ref(), principal.as_ref()).await?;
    Ok(Json(stats))
}
