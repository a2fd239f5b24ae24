//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Sign-in provider stored in `users.provider`.
pub const PROVIDER_LOCAL: &str = "local";
pub const PROVIDER_GOOGLE: &str = "google";
pub const PROVIDER_GITHUB: &str = "github";

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub nickname: String,
    /// `None` for accounts created through OAuth.
    pub password_hash: Option<String>,
    pub provider: String,
    pub provider_id: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub nickname: String,
    pub provider: String,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            provider: user.provider.clone(),
            profile_image: user.profile_image.clone(),
            created_at: user.created_at,
        }
    }
}

/// Public author info embedded in project and comment responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthorInfo {
    pub id: DbId,
    pub nickname: String,
    pub profile_image: Option<String>,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub nickname: String,
    pub password_hash: Option<String>,
    pub provider: String,
    pub provider_id: Option<String>,
    pub profile_image: Option<String>,
}

/// DTO for updating the mutable columns of a user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
}
