use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{list_users, update_user_role};

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}/role", patch(update_user_role))
}
