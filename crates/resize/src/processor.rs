//! Per-object resize pipeline: fetch, transcode, write.

use serde::Serialize;
use sidemate_core::image_resize::{
    destination_bucket, destination_key, resize_box_for_key, supported_extension,
};

use crate::error::ResizeError;
use crate::payload::{InvokePayload, SourceObject};
use crate::store::{ObjectStore, WEBP_CONTENT_TYPE};
use crate::transcode::transcode_to_webp;

/// Counts returned by `POST /invoke`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InvokeSummary {
    pub resized: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// What happened to one source object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectOutcome {
    /// The WebP variant was written here.
    Resized { bucket: String, key: String },
    /// The key has no supported image extension.
    Skipped,
}

/// Run every object named by `payload`. Failures are logged and counted,
/// never propagated.
///
/// `source_bucket` is used for trigger records that name no bucket.
pub async fn process_payload<S: ObjectStore>(
    store: &S,
    payload: &InvokePayload,
    source_bucket: Option<&str>,
) -> InvokeSummary {
    let mut summary = InvokeSummary::default();

    for source in payload.sources(source_bucket) {
        let result = match source {
            Ok(source) => process_object(store, &source).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(ObjectOutcome::Resized { .. }) => summary.resized += 1,
            Ok(ObjectOutcome::Skipped) => summary.skipped += 1,
            Err(ResizeError::MissingBucket(key)) => {
                tracing::warn!(key = %key, "No source bucket configured, skipping");
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Resize failed");
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Resize one object into the `-resized` companion bucket.
///
/// The destination is written only after the transcode succeeded.
pub async fn process_object<S: ObjectStore>(
    store: &S,
    source: &SourceObject,
) -> Result<ObjectOutcome, ResizeError> {
    if supported_extension(&source.key).is_none() {
        tracing::info!(bucket = %source.bucket, key = %source.key, "Unsupported image type, skipping");
        return Ok(ObjectOutcome::Skipped);
    }

    let original = store.get(&source.bucket, &source.key).await?;
    let webp = transcode_to_webp(&original, resize_box_for_key(&source.key))?;

    let bucket = destination_bucket(&source.bucket);
    let key = destination_key(&source.key);
    store.put(&bucket, &key, webp, WEBP_CONTENT_TYPE).await?;

    tracing::info!(
        source_bucket = %source.bucket,
        source_key = %source.key,
        bucket = %bucket,
        key = %key,
        "Resized image written",
    );
    Ok(ObjectOutcome::Resized { bucket, key })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::transcode::tests::png_bytes;

    /// In-memory [`ObjectStore`] keyed by `(bucket, key)`.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) objects: Mutex<HashMap<(String, String), (Vec<u8>, String)>>,
    }

    impl MemoryStore {
        pub(crate) fn with_object(bucket: &str, key: &str, body: Vec<u8>) -> Self {
            let store = Self::default();
            store.objects.lock().unwrap().insert(
                (bucket.to_string(), key.to_string()),
                (body, "image/png".to_string()),
            );
            store
        }

        pub(crate) fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), key.to_string()))
                .map(|(_, content_type)| content_type.clone())
        }
    }

    impl ObjectStore for MemoryStore {
        async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ResizeError> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), key.to_string()))
                .map(|(body, _)| body.clone())
                .ok_or_else(|| ResizeError::Storage(format!("NoSuchKey: {bucket}/{key}")))
        }

        async fn put(
            &self,
            bucket: &str,
            key: &str,
            body: Vec<u8>,
            content_type: &str,
        ) -> Result<(), ResizeError> {
            self.objects.lock().unwrap().insert(
                (bucket.to_string(), key.to_string()),
                (body, content_type.to_string()),
            );
            Ok(())
        }
    }

    fn source(bucket: &str, key: &str) -> SourceObject {
        SourceObject {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    #[tokio::test]
    async fn writes_webp_into_resized_bucket() {
        let store = MemoryStore::with_object("uploads", "profileImage/1_a.PNG", png_bytes(300, 300));

        let outcome = process_object(&store, &source("uploads", "profileImage/1_a.PNG"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ObjectOutcome::Resized {
                bucket: "uploads-resized".into(),
                key: "profileImage/1_a.webp".into(),
            }
        );
        assert_eq!(
            store.content_type("uploads-resized", "profileImage/1_a.webp").as_deref(),
            Some("image/webp")
        );
    }

    #[tokio::test]
    async fn unsupported_extension_is_skipped_without_reading() {
        let store = MemoryStore::default();
        let outcome = process_object(&store, &source("uploads", "profileImage/1_a.gif"))
            .await
            .unwrap();
        assert_eq!(outcome, ObjectOutcome::Skipped);
    }

    #[tokio::test]
    async fn corrupt_source_writes_nothing() {
        let store = MemoryStore::with_object("uploads", "profileImage/1_a.jpg", b"junk".to_vec());

        let result = process_object(&store, &source("uploads", "profileImage/1_a.jpg")).await;
        assert!(matches!(result, Err(ResizeError::Image(_))));
        assert_eq!(store.content_type("uploads-resized", "profileImage/1_a.webp"), None);
    }

    #[tokio::test]
    async fn payload_summary_counts_every_record() {
        let store = MemoryStore::with_object("uploads", "projectContentImage/1_a.png", png_bytes(800, 400));
        let payload: InvokePayload = serde_json::from_value(serde_json::json!({
            "Records": [
                { "s3": { "bucket": { "name": "uploads" }, "object": { "key": "projectContentImage/1_a.png" } } },
                { "s3": { "bucket": { "name": "uploads" }, "object": { "key": "notes.txt" } } },
                { "s3": { "bucket": { "name": "uploads" }, "object": { "key": "profileImage/missing.jpg" } } }
            ]
        }))
        .unwrap();

        let summary = process_payload(&store, &payload, None).await;
        assert_eq!(
            summary,
            InvokeSummary {
                resized: 1,
                skipped: 1,
                failed: 1,
            }
        );
    }

    #[tokio::test]
    async fn bucketless_records_use_the_configured_bucket() {
        let store = MemoryStore::with_object("uploads", "profileImage/1_a.png", png_bytes(200, 200));
        let payload: InvokePayload = serde_json::from_value(serde_json::json!({
            "Records": [{ "s3": { "object": { "key": "profileImage/1_a.png" } } }]
        }))
        .unwrap();

        let summary = process_payload(&store, &payload, Some("uploads")).await;
        assert_eq!(summary.resized, 1);
        assert!(store.content_type("uploads-resized", "profileImage/1_a.webp").is_some());

        // Without a configured bucket the record is skipped, not failed.
        let summary = process_payload(&store, &payload, None).await;
        assert_eq!(
            summary,
            InvokeSummary {
                resized: 0,
                skipped: 1,
                failed: 0,
            }
        );
    }
}
