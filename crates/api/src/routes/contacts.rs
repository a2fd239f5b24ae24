use axum::routing::post;
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// Routes mounted at `/contacts`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(contacts::create_contact))
}
