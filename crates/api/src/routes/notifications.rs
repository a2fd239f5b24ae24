use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /            -> list_notifications
/// PATCH  /read-all    -> mark_all_read
/// PATCH  /{id}/read   -> mark_read
/// DELETE /{id}        -> delete_notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/read-all", patch(notifications::mark_all_read))
        .route("/{id}/read", patch(notifications::mark_read))
        .route("/{id}", delete(notifications::delete_notification))
}
