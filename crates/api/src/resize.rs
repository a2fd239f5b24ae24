//! Client for the image resize service.
//!
//! After an upload the API asks the resize service to produce the WebP
//! variant right away, using the service's direct-invoke payload.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Upper bound on a single resize call.
const INVOKE_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum ResizeInvokeError {
    #[error("Resize request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Resize service returned HTTP {0}")]
    HttpStatus(u16),
}

/// Direct-invoke payload understood by the resize service.
#[derive(Debug, Serialize)]
pub struct DirectInvoke<'a> {
    #[serde(rename = "s3ObjectKey")]
    pub s3_object_key: &'a str,
}

/// Counts the resize service answers with.
#[derive(Debug, Deserialize)]
pub struct InvokeSummary {
    pub resized: u32,
    #[serde(default)]
    pub failed: u32,
}

/// POST `{ "s3ObjectKey": source_url }` to `service_url`.
///
/// Returns whether the service reported the variant as written.
pub async fn invoke_resize(
    http: &reqwest::Client,
    service_url: &str,
    source_url: &str,
) -> Result<bool, ResizeInvokeError> {
    let response = http
        .post(service_url)
        .timeout(INVOKE_TIMEOUT)
        .json(&DirectInvoke {
            s3_object_key: source_url,
        })
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ResizeInvokeError::HttpStatus(response.status().as_u16()));
    }
    let summary: InvokeSummary = response.json().await?;
    Ok(summary.resized > 0 && summary.failed == 0)
}
