//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated caller, required.
//! - [`auth::OptionalAuthUser`] -- the caller if a valid token was sent.

pub mod auth;
