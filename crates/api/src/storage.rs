//! Upload bucket access through the AWS S3 SDK.

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use sidemate_core::storage::{object_url, resized_object_url};

use crate::config::non_empty_var;

/// Location of the upload bucket.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
}

impl StorageConfig {
    /// | Env Var         | Required | Default          |
    /// |-----------------|----------|------------------|
    /// | `UPLOAD_BUCKET` | yes      |                  |
    /// | `AWS_REGION`    | no       | `ap-northeast-2` |
    ///
    /// Returns `None` if `UPLOAD_BUCKET` is not set. Credentials come from
    /// the standard AWS provider chain.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            bucket: non_empty_var("UPLOAD_BUCKET")?,
            region: non_empty_var("AWS_REGION").unwrap_or_else(|| "ap-northeast-2".to_string()),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object upload failed: {0}")]
    Upload(String),
}

/// Writes user uploads to the configured bucket.
pub struct ImageStorage {
    client: aws_sdk_s3::Client,
    config: StorageConfig,
}

impl ImageStorage {
    /// Build an S3 client for `config.region` from the default credential chain.
    pub async fn connect(config: StorageConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            config,
        }
    }

    /// Public URL of `key` in the upload bucket.
    pub fn url_for(&self, key: &str) -> String {
        object_url(&self.config.bucket, &self.config.region, key)
    }

    /// Public URL of the WebP variant the resize service writes for `key`.
    pub fn resized_url_for(&self, key: &str) -> String {
        resized_object_url(&self.config.bucket, &self.config.region, key)
    }

    pub async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(e).to_string()))?;

        tracing::debug!(bucket = %self.config.bucket, key, "Object uploaded");
        Ok(())
    }
}
