use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use sidemate_core::storage::MAX_UPLOAD_BYTES;

use crate::handlers::uploads;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers around the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /{kind}   -> upload_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", post(uploads::upload_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES))
}
