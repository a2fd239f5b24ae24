//! Bookmark model and toggle result.

use serde::Serialize;
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `bookmarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bookmark {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub created_at: Timestamp,
}

/// Which branch a bookmark toggle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkAction {
    /// A new bookmark row was inserted.
    Save,
    /// The existing bookmark row was deleted.
    Cancel,
}

impl BookmarkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Cancel => "cancel",
        }
    }
}
