//! Middleware for authentication and authorization.
//!
//! Identity resolution itself lives in [`crate::identity`]; this module
//! holds what routes consume:
//!
//! - [`auth`]: the `CurrentUser` / `MaybeUser` extractors
//! - [`guards`]: pure authorization checks and the `require_*` layers
//! - [`rate_limit`]: per-IP limiter for the auth endpoints
//!
//! # Request flow
//!
//! 1. A resolver layer verifies the credential for its trust domain and
//!    attaches a `RequestIdentity` to the request
//! 2. Route-level guards (`require_admin`, `require_verified`, ...) pass or
//!    terminate with a reason-coded 401/403
//! 3. Handlers extract `CurrentUser` or `MaybeUser`

pub mod auth;
pub mod guards;
pub mod rate_limit;
