//! Comment model and DTOs.

use serde::{Deserialize, Serialize};
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Comment joined with its author, as listed under a project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub project_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub author_id: DbId,
    pub author_nickname: String,
    pub author_profile_image: Option<String>,
}

/// Request body for creating or editing a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentInput {
    pub content: String,
}
