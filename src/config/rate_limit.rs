use governor::Quota;
use std::num::NonZeroU32;

/// Rate limit configuration for the auth endpoints.
///
/// Only the auth surface (login/register/refresh) is rate limited; the rest
/// of the API relies on upstream infrastructure.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Sustained requests per second per client IP.
    pub auth_per_second: u32,
    /// Burst size per client IP.
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Quota for the auth endpoints' keyed limiter.
    pub fn auth_quota(&self) -> Quota {
        let per_second =
            NonZeroU32::new(self.auth_per_second.max(1)).expect("per_second is non-zero");
        let burst = NonZeroU32::new(self.auth_burst_size.max(1)).expect("burst is non-zero");
        Quota::per_second(per_second).allow_burst(burst)
    }
}
