//! Record kept when a user deletes their account.

use serde::{Deserialize, Serialize};
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `delete_account_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeleteAccountRequest {
    pub id: DbId,
    pub email: String,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for `DELETE /api/v1/users/me`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteAccountInput {
    pub reason: Option<String>,
}
