//! Project report handler.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sidemate_core::error::CoreError;
use sidemate_core::types::DbId;
use sidemate_core::validation::{validate_text, MAX_REPORT_REASON_LENGTH};
use sidemate_db::models::notification::{CreateNotification, KIND_REPORT};
use sidemate_db::models::report::{CreateReport, Report};
use sidemate_db::repositories::{NotificationRepo, ProjectRepo, ReportRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/reports
///
/// One report per user and project; a repeat answers 409 through the
/// `uq_reports_project_reporter` constraint.
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<ApiResponse<Report>>)> {
    validate_text("Reason", &input.reason, MAX_REPORT_REASON_LENGTH)?;

    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let report =
        ReportRepo::create(&state.pool, project_id, auth.user_id, input.reason.trim()).await?;

    NotificationRepo::create(
        &state.pool,
        &CreateNotification {
            user_id: project.user_id,
            actor_id: Some(auth.user_id),
            project_id: Some(project_id),
            kind: KIND_REPORT,
            message: format!("Your project \"{}\" was reported", project.title),
        },
    )
    .await?;

    tracing::info!(
        report_id = report.id,
        project_id,
        user_id = auth.user_id,
        "Project reported",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("reported successfully", report)),
    ))
}
