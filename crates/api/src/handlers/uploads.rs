//! Image upload handler.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sidemate_core::storage::{
    content_type_for_extension, upload_extension, upload_object_key, UploadKind, MAX_UPLOAD_BYTES,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::resize::invoke_resize;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Name of the multipart field carrying the file.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub key: String,
    /// URL of the original object.
    pub url: String,
    /// URL where the WebP variant lives once resized.
    pub resized_url: String,
    /// Whether the resize service confirmed the variant during this request.
    pub resized: bool,
}

/// POST /api/v1/uploads/{kind}
///
/// Multipart upload of one image in field `image`. The object lands at
/// `{kind}/{user_id}_{uuid}.{ext}`.
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadResult>>)> {
    let kind = UploadKind::parse(&kind)?;
    let storage = state
        .storage
        .clone()
        .ok_or_else(|| AppError::ServiceUnavailable("Image storage is not configured".into()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let ext = upload_extension(&file_name)?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((ext, data));
        break;
    }

    let (ext, data) = upload.ok_or_else(|| {
        AppError::BadRequest(format!("Multipart field '{IMAGE_FIELD}' is required"))
    })?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {} MiB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let key = upload_object_key(
        kind,
        auth.user_id,
        &Uuid::new_v4().simple().to_string(),
        &ext,
    );
    storage
        .put(&key, data.to_vec(), content_type_for_extension(&ext))
        .await
        .map_err(|e| AppError::BadGateway(e.to_string()))?;

    let url = storage.url_for(&key);
    let resized = match &state.config.resize_service_url {
        Some(service_url) => match invoke_resize(&state.http, service_url, &url).await {
            Ok(resized) => resized,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Resize invocation failed");
                false
            }
        },
        None => false,
    };

    tracing::info!(
        user_id = auth.user_id,
        kind = kind.as_str(),
        key = %key,
        resized,
        "Image uploaded",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UploadResult {
            resized_url: storage.resized_url_for(&key),
            url,
            key,
            resized,
        })),
    ))
}
