//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sidemate_core::error::CoreError;
use sidemate_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sidemate_core::reconcile::ReconcileReport;
use sidemate_core::types::DbId;
use sidemate_core::validation::{
    validate_hashtags, validate_member_types, validate_recruit_count, validate_title,
};
use sidemate_db::models::project::{
    Project, ProjectDetail, ProjectInput, ProjectListParams, ProjectSummary,
};
use sidemate_db::repositories::{ListScope, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Message for an update where every aspect matched the stored state.
pub const MSG_NOTHING_CHANGED: &str = "nothing changed";
/// Message for an update that wrote at least one aspect.
pub const MSG_UPDATED: &str = "updated successfully";

#[derive(Debug, Serialize)]
pub struct CreatedProject {
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<ApiResponse<Vec<ProjectSummary>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let projects = ProjectRepo::list(&state.pool, &params, ListScope::All, limit, offset).await?;
    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ProjectInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedProject>>)> {
    validate_project_input(&input)?;

    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(project_id = project.id, user_id = auth.user_id, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "created successfully",
            CreatedProject { id: project.id },
        )),
    ))
}

/// GET /api/v1/projects/{id}
///
/// Counts one view per call.
pub async fn get_project(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<ProjectDetail>>> {
    let detail = ProjectRepo::view_detail(&state.pool, id, viewer.user_id())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/v1/projects/{id}
///
/// Reconcile the project with the full desired state in the body. Answers
/// "nothing changed" when no aspect differed.
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ProjectInput>,
) -> AppResult<Json<ApiResponse<ReconcileReport>>> {
    ensure_author(&state, id, &auth).await?;
    validate_project_input(&input)?;

    let report = ProjectRepo::reconcile(&state.pool, id, &input).await?;

    let message = if report.any_changed() {
        tracing::info!(
            project_id = id,
            user_id = auth.user_id,
            changed = ?report.changed_aspects(),
            "Project updated",
        );
        MSG_UPDATED
    } else {
        MSG_NOTHING_CHANGED
    };

    Ok(Json(ApiResponse::with_message(message, report)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    ensure_author(&state, id, &auth).await?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
    Ok(Json(ApiResponse::message("deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load project `id` and require `auth` to be its author.
pub(crate) async fn ensure_author(
    state: &AppState,
    id: DbId,
    auth: &AuthUser,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    if project.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this project".into(),
        )));
    }
    Ok(project)
}

/// Reject an invalid desired state before anything is written.
fn validate_project_input(input: &ProjectInput) -> Result<(), CoreError> {
    validate_title(&input.title)?;
    validate_hashtags(&input.hashtags)?;
    validate_member_types(&input.member_types)?;
    validate_recruit_count(input.recruit_count)
}
