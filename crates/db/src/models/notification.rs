//! Notification model and DTOs.

use serde::{Deserialize, Serialize};
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Someone commented on the recipient's project.
pub const KIND_COMMENT: &str = "comment";
/// The recipient's project was reported.
pub const KIND_REPORT: &str = "report";

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub actor_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub actor_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub kind: &'static str,
    pub message: String,
}

/// Query parameters for `GET /api/v1/notifications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationListParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
