//! Contact form submissions.

use serde::{Deserialize, Serialize};
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub email: String,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /api/v1/contacts`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub email: String,
    pub title: String,
    pub content: String,
}
