pub mod auth;
pub mod bookmarks;
pub mod comments;
pub mod contacts;
pub mod health;
pub mod notifications;
pub mod projects;
pub mod reports;
pub mod uploads;
pub mod users;

use sidemate_events::Notice;

use crate::auth::oauth::is_placeholder_email;
use crate::state::AppState;

/// Send `notice` if a mailer is configured; failures are logged only.
pub(crate) async fn send_email_best_effort(state: &AppState, to: &str, notice: &Notice) {
    let Some(mailer) = &state.mailer else {
        tracing::debug!(to, "Mailer not configured, skipping email");
        return;
    };
    if is_placeholder_email(to) {
        return;
    }
    if let Err(e) = mailer.send(to, notice).await {
        tracing::warn!(to, error = %e, "Failed to send email");
    }
}
