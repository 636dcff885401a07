//! Configuration modules for the UPE API.
//!
//! Each submodule owns one configuration concern, loaded from environment
//! variables via a `from_env()` constructor:
//!
//! - [`cors`]: allowed origins for the browser frontend
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: first-party JWT signing/verification settings
//! - [`provider`]: identity-provider trust domain settings
//! - [`rate_limit`]: request rate limits for the auth surface

pub mod cors;
pub mod database;
pub mod jwt;
pub mod provider;
pub mod rate_limit;
