//! Handlers for the `/users` resource.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sidemate_core::error::CoreError;
use sidemate_core::member_type::validate_member_type;
use sidemate_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sidemate_core::types::DbId;
use sidemate_core::validation::validate_nickname;
use sidemate_db::models::delete_account_request::DeleteAccountInput;
use sidemate_db::models::profile::{Profile, UpdateProfile};
use sidemate_db::models::project::{ProjectListParams, ProjectSummary};
use sidemate_db::models::user::{AuthorInfo, UpdateUser, UserResponse};
use sidemate_db::repositories::{AccountRepo, ListScope, ProfileRepo, ProjectRepo, UserRepo};
use sidemate_events::Notice;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::send_email_best_effort;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NicknameCheckParams {
    pub nickname: String,
}

#[derive(Debug, Serialize)]
pub struct NicknameAvailability {
    pub available: bool,
}

/// Public page of one user.
#[derive(Debug, Serialize)]
pub struct UserPage {
    pub user: AuthorInfo,
    pub profile: Option<Profile>,
    pub projects: Vec<ProjectSummary>,
}

/// Request body for `PATCH /users/me`. Absent fields are left as they are.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMeRequest {
    pub nickname: Option<String>,
    pub profile_image: Option<String>,
    pub introduction: Option<String>,
    pub position: Option<String>,
    pub github_url: Option<String>,
    pub blog_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub profile: Profile,
}

/// Request body for `PUT /users/me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// Required when the account already has a password.
    pub current_password: Option<String>,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/nickname-check?nickname=
///
/// The caller's own nickname counts as available.
pub async fn nickname_check(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(params): Query<NicknameCheckParams>,
) -> AppResult<Json<ApiResponse<NicknameAvailability>>> {
    let nickname = params.nickname.trim();
    validate_nickname(nickname)?;

    let taken = UserRepo::nickname_exists(&state.pool, nickname, viewer.user_id()).await?;
    Ok(Json(ApiResponse::ok(NicknameAvailability { available: !taken })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserPage>>> {
    let user = UserRepo::find_author(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let profile = ProfileRepo::find_by_user(&state.pool, id).await?;
    let projects = ProjectRepo::list(
        &state.pool,
        &ProjectListParams::default(),
        ListScope::Author(id),
        MAX_PAGE_LIMIT,
        0,
    )
    .await?;

    Ok(Json(ApiResponse::ok(UserPage {
        user,
        profile,
        projects,
    })))
}

/// PATCH /api/v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<ApiResponse<MeResponse>>> {
    let nickname = input.nickname.as_deref().map(str::trim).map(str::to_string);
    if let Some(nickname) = &nickname {
        validate_nickname(nickname)?;
        if UserRepo::nickname_exists(&state.pool, nickname, Some(auth.user_id)).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "Nickname is already taken".into(),
            )));
        }
    }
    if let Some(position) = &input.position {
        validate_member_type(position)?;
    }

    let user = UserRepo::update(
        &state.pool,
        auth.user_id,
        &UpdateUser {
            nickname,
            profile_image: input.profile_image,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: auth.user_id,
    }))?;

    let profile = ProfileRepo::upsert(
        &state.pool,
        auth.user_id,
        &UpdateProfile {
            introduction: input.introduction,
            position: input.position,
            github_url: input.github_url,
            blog_url: input.blog_url,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(ApiResponse::with_message(
        "updated successfully",
        MeResponse {
            user: UserResponse::from(&user),
            profile,
        },
    )))
}

/// PUT /api/v1/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    if let Some(existing_hash) = user.password_hash.as_deref() {
        let current = input.current_password.as_deref().unwrap_or_default();
        let valid = verify_password(current, existing_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !valid {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Current password is incorrect".into(),
            )));
        }
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, auth.user_id, &new_hash).await?;

    tracing::info!(user_id = auth.user_id, "Password changed");
    Ok(Json(ApiResponse::message("password changed")))
}

/// GET /api/v1/users/me/bookmarks
pub async fn my_bookmarks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<ApiResponse<Vec<ProjectSummary>>>> {
    list_scoped(&state, &params, ListScope::BookmarkedBy(auth.user_id)).await
}

/// GET /api/v1/users/me/projects
pub async fn my_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<ApiResponse<Vec<ProjectSummary>>>> {
    list_scoped(&state, &params, ListScope::Author(auth.user_id)).await
}

/// DELETE /api/v1/users/me
///
/// Deletes the account and everything it owns, then sends a confirmation
/// email when possible. The body (`{ "reason": .. }`) is optional.
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> AppResult<Json<ApiResponse<()>>> {
    let input: DeleteAccountInput = if body.is_empty() {
        DeleteAccountInput::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let reason = input.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let request = AccountRepo::delete_user(&state.pool, auth.user_id, reason)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = auth.user_id, request_id = request.id, "Account deleted");

    send_email_best_effort(&state, &request.email, &Notice::account_deleted(&user.nickname))
        .await;

    Ok(Json(ApiResponse::message("account deleted")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn list_scoped(
    state: &AppState,
    params: &ProjectListParams,
    scope: ListScope,
) -> AppResult<Json<ApiResponse<Vec<ProjectSummary>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let projects = ProjectRepo::list(&state.pool, params, scope, limit, offset).await?;
    Ok(Json(ApiResponse::ok(projects)))
}
