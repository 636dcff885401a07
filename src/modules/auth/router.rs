use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{check_session, login_user, me, refresh_token, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_token))
        .route("/me", get(me))
        .route("/check", get(check_session))
}
