//! Project report model and DTOs.

use serde::{Deserialize, Serialize};
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub project_id: DbId,
    pub reporter_id: DbId,
    pub reason: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /projects/{id}/reports`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReport {
    pub reason: String,
}
