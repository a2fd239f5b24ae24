//! Bookmark toggle handler.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use sidemate_core::error::CoreError;
use sidemate_core::types::DbId;
use sidemate_db::models::bookmark::BookmarkAction;
use sidemate_db::repositories::{BookmarkRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BookmarkToggled {
    pub action: BookmarkAction,
}

/// POST /api/v1/projects/{id}/bookmark
///
/// Saves the bookmark if the caller has none, cancels it otherwise.
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<BookmarkToggled>>> {
    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }

    let action = BookmarkRepo::toggle(&state.pool, auth.user_id, project_id).await?;

    tracing::info!(
        project_id,
        user_id = auth.user_id,
        action = action.as_str(),
        "Bookmark toggled",
    );

    Ok(Json(ApiResponse::with_message(
        action.as_str(),
        BookmarkToggled { action },
    )))
}
