//! Invoke payloads and the source objects they name.
//!
//! Two shapes are accepted on `POST /invoke`:
//!
//! ```text
//! { "Records": [{ "s3": { "bucket": { "name": .. }, "object": { "key": .. } } }] }
//! { "Records": [{ "s3": { "object": { "key": .. } } }] }
//! { "s3ObjectKey": "https://{bucket}.s3.{region}.amazonaws.com/{key}" }
//! ```

use serde::Deserialize;
use url::Url;

use crate::error::ResizeError;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InvokePayload {
    Trigger(TriggerEvent),
    Direct(DirectInvoke),
}

/// Object-storage notification event.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "Records")]
    pub records: Vec<TriggerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerRecord {
    pub s3: TriggerEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEntity {
    /// Absent in relayed events; the configured source bucket is used then.
    #[serde(default)]
    pub bucket: Option<BucketRef>,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    /// URL-encoded key, `+` standing for a space.
    pub key: String,
}

/// Direct invocation with the public URL of the source object.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectInvoke {
    #[serde(rename = "s3ObjectKey")]
    pub s3_object_key: String,
}

/// A decoded `(bucket, key)` pair to resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceObject {
    pub bucket: String,
    pub key: String,
}

impl InvokePayload {
    /// Every source object named by the payload, in order.
    ///
    /// Trigger records without a bucket fall back to `default_bucket`; with
    /// neither they yield [`ResizeError::MissingBucket`].
    pub fn sources(&self, default_bucket: Option<&str>) -> Vec<Result<SourceObject, ResizeError>> {
        match self {
            Self::Trigger(event) => event
                .records
                .iter()
                .map(|record| {
                    let key = decode_event_key(&record.s3.object.key);
                    let bucket = record
                        .s3
                        .bucket
                        .as_ref()
                        .map(|b| b.name.as_str())
                        .or(default_bucket)
                        .ok_or_else(|| ResizeError::MissingBucket(key.clone()))?;
                    Ok(SourceObject {
                        bucket: bucket.to_string(),
                        key,
                    })
                })
                .collect(),
            Self::Direct(direct) => vec![source_from_url(&direct.s3_object_key)],
        }
    }
}

/// Decode an event key: `+` becomes a space, then percent escapes are resolved.
pub fn decode_event_key(raw: &str) -> String {
    decode_form_component(&raw.replace('&', "%26").replace('=', "%3D"))
}

/// Split a virtual-hosted-style object URL into bucket and key.
///
/// The bucket is the first label of the host, the key is the path
/// without its leading `/`.
pub fn source_from_url(raw: &str) -> Result<SourceObject, ResizeError> {
    let url = Url::parse(raw).map_err(|e| ResizeError::Source(format!("{raw}: {e}")))?;
    let bucket = url
        .host_str()
        .and_then(|host| host.split('.').next())
        .filter(|label| !label.is_empty())
        .ok_or_else(|| ResizeError::Source(format!("{raw}: no bucket in host")))?;
    let path = url.path().trim_start_matches('/');
    if path.is_empty() {
        return Err(ResizeError::Source(format!("{raw}: no object key in path")));
    }

    // Path escapes only: a literal `+` stays a `+`.
    let key = decode_form_component(
        &path
            .replace('+', "%2B")
            .replace('&', "%26")
            .replace('=', "%3D"),
    );

    Ok(SourceObject {
        bucket: bucket.to_string(),
        key,
    })
}

fn decode_form_component(escaped: &str) -> String {
    url::form_urlencoded::parse(escaped.as_bytes())
        .map(|(name, _)| name.into_owned())
        .next()
        .unwrap_or_default()
}
