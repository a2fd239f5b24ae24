//! Handlers for project comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sidemate_core::error::CoreError;
use sidemate_core::types::DbId;
use sidemate_core::validation::{validate_text, MAX_COMMENT_LENGTH};
use sidemate_db::models::comment::{Comment, CommentInput, CommentWithAuthor};
use sidemate_db::models::notification::{CreateNotification, KIND_COMMENT};
use sidemate_db::repositories::{CommentRepo, NotificationRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<CommentWithAuthor>>>> {
    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    let comments = CommentRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// POST /api/v1/projects/{id}/comments
///
/// Notifies the project author unless they wrote the comment.
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CommentInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Comment>>)> {
    validate_text("Comment", &input.content, MAX_COMMENT_LENGTH)?;

    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let comment = CommentRepo::create(&state.pool, project_id, auth.user_id, input.content.trim())
        .await?;

    if project.user_id != auth.user_id {
        NotificationRepo::create(
            &state.pool,
            &CreateNotification {
                user_id: project.user_id,
                actor_id: Some(auth.user_id),
                project_id: Some(project_id),
                kind: KIND_COMMENT,
                message: format!("New comment on \"{}\"", project.title),
            },
        )
        .await?;
    }

    tracing::info!(
        comment_id = comment.id,
        project_id,
        user_id = auth.user_id,
        "Comment created",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("created successfully", comment)),
    ))
}

/// PUT /api/v1/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentInput>,
) -> AppResult<Json<ApiResponse<Comment>>> {
    ensure_comment_author(&state, id, &auth).await?;
    validate_text("Comment", &input.content, MAX_COMMENT_LENGTH)?;

    let comment = CommentRepo::update(&state.pool, id, input.content.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Comment", id }))?;

    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment updated");
    Ok(Json(ApiResponse::with_message("updated successfully", comment)))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    ensure_comment_author(&state, id, &auth).await?;

    if !CommentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Comment", id }));
    }

    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment deleted");
    Ok(Json(ApiResponse::message("deleted successfully")))
}

async fn ensure_comment_author(state: &AppState, id: DbId, auth: &AuthUser) -> AppResult<Comment> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Comment", id }))?;
    if comment.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this comment".into(),
        )));
    }
    Ok(comment)
}
