//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//! - [`oauth`] -- Authorization-code exchange with Google and GitHub.

pub mod jwt;
pub mod oauth;
pub mod password;
