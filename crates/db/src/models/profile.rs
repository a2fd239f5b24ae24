//! Profile model: the free-form "about me" part of a user page.

use serde::{Deserialize, Serialize};
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub introduction: Option<String>,
    /// A member type string (e.g. `"designer"`).
    pub position: Option<String>,
    pub github_url: Option<String>,
    pub blog_url: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for upserting a profile. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub introduction: Option<String>,
    pub position: Option<String>,
    pub github_url: Option<String>,
    pub blog_url: Option<String>,
}
