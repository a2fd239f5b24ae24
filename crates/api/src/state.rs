use std::sync::Arc;

use sidemate_events::EmailDelivery;

use crate::config::ServerConfig;
use crate::storage::ImageStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: sidemate_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Upload bucket client. `None` when storage is not configured.
    pub storage: Option<Arc<ImageStorage>>,
    /// SMTP mailer. `None` when `SMTP_HOST` is not set.
    pub mailer: Option<Arc<EmailDelivery>>,
    /// Outbound HTTP client (OAuth providers, resize service).
    pub http: reqwest::Client,
}
