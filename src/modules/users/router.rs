use axum::{Router, middleware, routing::get};

use crate::middleware::guards::{require_empresa, require_verified};
use crate::state::AppState;

use super::controller::{company_profile, get_profile, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .merge(
            // Guards compose outermost-first: role, then verification.
            Router::new()
                .route("/company", get(company_profile))
                .route_layer(middleware::from_fn(require_verified))
                .route_layer(middleware::from_fn(require_empresa)),
        )
}
