//! Contact form handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sidemate_core::validation::{
    validate_email, validate_text, MAX_CONTACT_CONTENT_LENGTH, MAX_TITLE_LENGTH,
};
use sidemate_db::models::contact::{Contact, CreateContact};
use sidemate_db::repositories::ContactRepo;
use sidemate_events::Notice;

use crate::error::AppResult;
use crate::handlers::send_email_best_effort;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/contacts
///
/// Stores the message and forwards it to `ADMIN_EMAIL` when configured.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContact>,
) -> AppResult<(StatusCode, Json<ApiResponse<Contact>>)> {
    validate_email(input.email.trim())?;
    validate_text("Title", &input.title, MAX_TITLE_LENGTH)?;
    validate_text("Content", &input.content, MAX_CONTACT_CONTENT_LENGTH)?;

    let contact = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(contact_id = contact.id, "Contact message stored");

    if let Some(admin) = &state.config.admin_email {
        let notice = Notice::contact(&contact.email, &contact.title, &contact.content);
        send_email_best_effort(&state, admin, &notice).await;
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("sent successfully", contact)),
    ))
}
