use std::fmt;
use std::sync::Arc;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::provider::ProviderConfig;
use crate::config::rate_limit::RateLimitConfig;
use crate::identity::provider::{ClerkProvider, IdentityProvider};
use crate::store::{PgUserStore, UserStore};

/// Shared application state.
///
/// The store and the identity provider are trait objects constructed once
/// at startup and injected everywhere they are needed; tests build an
/// `AppState` around in-memory fakes instead.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub provider: Arc<dyn IdentityProvider>,
    pub jwt_config: JwtConfig,
    pub provider_config: ProviderConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

pub async fn init_app_state() -> AppState {
    let pool = init_db_pool().await;
    let provider_config = ProviderConfig::from_env();

    AppState {
        store: Arc::new(PgUserStore::new(pool)),
        provider: Arc::new(ClerkProvider::new(&provider_config)),
        jwt_config: JwtConfig::from_env(),
        provider_config,
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
    }
}
