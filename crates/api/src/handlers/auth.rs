//! Handlers for the `/auth` resource (sign-up, login, OAuth, tokens).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sidemate_core::error::CoreError;
use sidemate_core::validation::{validate_email, validate_nickname};
use sidemate_db::models::session::CreateSession;
use sidemate_db::models::user::{CreateUser, User, UserResponse, PROVIDER_LOCAL};
use sidemate_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::oauth::{
    fetch_profile, nickname_candidate, placeholder_email, OAuthProfile, OAuthProvider,
};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Upper bound on numeric suffixes tried when an OAuth nickname is taken.
const MAX_NICKNAME_ATTEMPTS: u32 = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub nickname: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/oauth/{provider}`.
#[derive(Debug, Deserialize)]
pub struct OAuthLoginRequest {
    pub code: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication payload returned by every login flavour.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create a local account and log it in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let email = input.email.trim().to_lowercase();
    let nickname = input.nickname.trim().to_string();

    validate_email(&email)?;
    validate_nickname(&nickname)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::email_exists(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }
    if UserRepo::nickname_exists(&state.pool, &nickname, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Nickname is already taken".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            nickname,
            password_hash: Some(password_hash),
            provider: PROVIDER_LOCAL.to_string(),
            provider_id: None,
            profile_image: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User signed up");

    let response = create_auth_response(&state, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("signed up successfully", response)),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    // Provider accounts have no password to check.
    let password_hash = user.password_hash.as_deref().ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    ensure_active(&user)?;

    tracing::info!(user_id = user.id, "User logged in");

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/v1/auth/oauth/{provider}
///
/// Exchange a provider authorization code, creating the account on first
/// login.
pub async fn oauth_login(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(input): Json<OAuthLoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let provider = OAuthProvider::parse(&provider)?;
    let client = state.config.oauth.client(provider).ok_or_else(|| {
        AppError::BadRequest(format!("OAuth provider '{}' is not configured", provider.as_str()))
    })?;
    if input.code.trim().is_empty() {
        return Err(AppError::BadRequest("Authorization code is required".into()));
    }

    let profile = fetch_profile(&state.http, provider, client, input.code.trim())
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let user = match UserRepo::find_by_provider(&state.pool, provider.as_str(), &profile.provider_id)
        .await?
    {
        Some(user) => user,
        None => create_oauth_user(&state, provider, &profile).await?,
    };

    ensure_active(&user)?;

    tracing::info!(user_id = user.id, provider = provider.as_str(), "OAuth login");

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Rotation: the presented token is single-use.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    ensure_active(&user)?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(Json(ApiResponse::message("logged out")))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_active(user: &User) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    Ok(())
}

/// Insert a provider account with the first free nickname derived from the
/// profile name.
async fn create_oauth_user(
    state: &AppState,
    provider: OAuthProvider,
    profile: &OAuthProfile,
) -> AppResult<User> {
    let mut nickname = None;
    for attempt in 0..MAX_NICKNAME_ATTEMPTS {
        let candidate = nickname_candidate(profile.name.as_deref(), attempt);
        if !UserRepo::nickname_exists(&state.pool, &candidate, None).await? {
            nickname = Some(candidate);
            break;
        }
    }
    let nickname = nickname.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Could not find a free nickname for this account".into(),
        ))
    })?;

    let email = profile
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_else(|| placeholder_email(provider, &profile.provider_id));

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            nickname,
            password_hash: None,
            provider: provider.as_str().to_string(),
            provider_id: Some(profile.provider_id.clone()),
            profile_image: profile.avatar_url.clone(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, provider = provider.as_str(), "OAuth account created");
    Ok(user)
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
