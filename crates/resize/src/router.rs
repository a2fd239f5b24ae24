//! HTTP surface of the resize service.
//!
//! ```text
//! GET  /health  -> health
//! POST /invoke  -> invoke
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::payload::InvokePayload;
use crate::processor::{process_payload, InvokeSummary};
use crate::store::ObjectStore;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Shared state of the invoke handler.
pub struct InvokeState<S> {
    pub store: Arc<S>,
    /// Fallback for trigger records that name no bucket.
    pub source_bucket: Option<Arc<str>>,
}

impl<S> Clone for InvokeState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            source_bucket: self.source_bucket.clone(),
        }
    }
}

/// Build the router over a shared object store.
pub fn build_router<S: ObjectStore + 'static>(
    store: Arc<S>,
    source_bucket: Option<String>,
) -> Router {
    let state = InvokeState {
        store,
        source_bucket: source_bucket.map(Arc::from),
    };

    Router::new()
        .route("/health", get(health))
        .route("/invoke", post(invoke::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /invoke
///
/// Always answers 200 with the per-object counts; an unrecognised body is
/// logged and counted as nothing.
async fn invoke<S: ObjectStore + 'static>(
    State(state): State<InvokeState<S>>,
    Json(body): Json<serde_json::Value>,
) -> Json<InvokeSummary> {
    let payload = match serde_json::from_value::<InvokePayload>(body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Unrecognised invoke payload");
            return Json(InvokeSummary::default());
        }
    };

    let summary =
        process_payload(state.store.as_ref(), &payload, state.source_bucket.as_deref()).await;
    tracing::info!(
        resized = summary.resized,
        skipped = summary.skipped,
        failed = summary.failed,
        "Invoke finished",
    );
    Json(summary)
}
