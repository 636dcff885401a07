//! Request identity resolution.
//!
//! Every inbound request passes through one of two resolver layers, each
//! bound to a trust domain:
//!
//! - [`resolver::provider_session`]: verifies an identity-provider session
//!   token (cookie or bearer) and materializes a local user record for the
//!   verified subject, provisioning one on first sight.
//! - [`resolver::local_jwt`]: verifies a first-party JWT and looks up the
//!   existing user record it names.
//!
//! Resolution is best-effort: extraction, verification, and
//! materialization never terminate a request. Their outcome (an
//! authenticated [`principal::Principal`], anonymous, or a recorded token
//! rejection) is attached to the request as a
//! [`principal::RequestIdentity`], and only the authorization guards in
//! [`crate::middleware`] turn a bad outcome into an error response.

pub mod extract;
pub mod materialize;
pub mod principal;
pub mod provider;
pub mod resolver;
