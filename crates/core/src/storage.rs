//! Object storage naming for user uploads.
//!
//! Upload keys are grouped by [`UploadKind`] so the resize policy can pick
//! a target box from the key alone.

use crate::error::CoreError;
use crate::image_resize::{destination_bucket, destination_key, supported_extension};
use crate::types::DbId;

/// Marker stored in `projects.representative_image` when no cover image was chosen.
pub const DEFAULT_REPRESENTATIVE_IMAGE: &str = "defaultImage";

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Category of an uploaded image; doubles as the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfileImage,
    ProjectContentImage,
    ProjectRepresentativeImage,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileImage => "profileImage",
            Self::ProjectContentImage => "projectContentImage",
            Self::ProjectRepresentativeImage => "projectRepresentativeImage",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "profileImage" => Ok(Self::ProfileImage),
            "projectContentImage" => Ok(Self::ProjectContentImage),
            "projectRepresentativeImage" => Ok(Self::ProjectRepresentativeImage),
            other => Err(CoreError::Validation(format!(
                "Unknown upload kind '{other}'"
            ))),
        }
    }
}

/// Validate an uploaded file name and return its lowercase extension.
pub fn upload_extension(file_name: &str) -> Result<String, CoreError> {
    supported_extension(file_name).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unsupported image type for '{file_name}'. Allowed: jpg, jpeg, png, webp"
        ))
    })
}

/// MIME type for a supported lowercase extension.
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// `{kind}/{user_id}_{unique}.{ext}`
pub fn upload_object_key(kind: UploadKind, user_id: DbId, unique: &str, ext: &str) -> String {
    format!("{}/{user_id}_{unique}.{ext}", kind.as_str())
}

/// Public virtual-hosted-style URL of an object.
pub fn object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

/// Public URL of the resized variant of `key` uploaded to `bucket`.
pub fn resized_object_url(bucket: &str, region: &str, key: &str) -> String {
    object_url(&destination_bucket(bucket), region, &destination_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_kind_parses_its_own_prefix() {
        for kind in [
            UploadKind::ProfileImage,
            UploadKind::ProjectContentImage,
            UploadKind::ProjectRepresentativeImage,
        ] {
            assert_eq!(UploadKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert!(UploadKind::parse("avatar").is_err());
    }

    #[test]
    fn object_key_layout() {
        let key = upload_object_key(UploadKind::ProfileImage, 42, "abc", "png");
        assert_eq!(key, "profileImage/42_abc.png");
    }

    #[test]
    fn resized_url_points_at_webp_in_resized_bucket() {
        let url = resized_object_url("uploads", "ap-northeast-2", "profileImage/42_abc.PNG");
        assert_eq!(
            url,
            "https://uploads-resized.s3.ap-northeast-2.amazonaws.com/profileImage/42_abc.webp"
        );
    }

    #[test]
    fn upload_extension_rejects_gif() {
        assert_eq!(upload_extension("me.JPEG").unwrap(), "jpeg");
        assert!(upload_extension("me.gif").is_err());
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for_extension("jpg"), "image/jpeg");
        assert_eq!(content_type_for_extension("jpeg"), "image/jpeg");
        assert_eq!(content_type_for_extension("webp"), "image/webp");
    }
}
