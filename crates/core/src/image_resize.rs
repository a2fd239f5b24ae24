//! Resize policy for uploaded images.
//!
//! The resize service picks a target box from the object key, never
//! enlarges the source, and always writes WebP into the `-resized`
//! companion bucket.

/// Extensions the resize service accepts (compared lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Suffix appended to the source bucket name to form the destination bucket.
pub const RESIZED_BUCKET_SUFFIX: &str = "-resized";

/// Target bounding box. `height: None` means "derive from aspect ratio".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeBox {
    pub width: u32,
    pub height: Option<u32>,
}

/// Maps a key path fragment to a target box.
#[derive(Debug, Clone, Copy)]
pub struct ResizeRule {
    pub path_fragment: &'static str,
    pub target: ResizeBox,
}

/// Policy table, checked in order.
pub const RESIZE_RULES: &[ResizeRule] = &[
    ResizeRule {
        path_fragment: "projectRepresentativeImage/",
        target: ResizeBox {
            width: 324,
            height: Some(130),
        },
    },
    ResizeRule {
        path_fragment: "projectContentImage/",
        target: ResizeBox {
            width: 666,
            height: None,
        },
    },
    ResizeRule {
        path_fragment: "profileImage/",
        target: ResizeBox {
            width: 150,
            height: Some(150),
        },
    },
];

/// Concrete operation to run on a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOp {
    /// Leave dimensions as they are (transcode only).
    Keep,
    /// Scale to exactly these dimensions, preserving aspect ratio.
    Scale { width: u32, height: u32 },
    /// Scale to cover the box, then centre-crop to it.
    Fill { width: u32, height: u32 },
}

/// Look up the target box for an object key.
pub fn resize_box_for_key(key: &str) -> Option<ResizeBox> {
    RESIZE_RULES
        .iter()
        .find(|rule| key.contains(rule.path_fragment))
        .map(|rule| rule.target)
}

/// Lowercase extension of `key` if it is one of [`SUPPORTED_EXTENSIONS`].
pub fn supported_extension(key: &str) -> Option<String> {
    let file_name = key.rsplit('/').next()?;
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// `my-bucket` -> `my-bucket-resized`.
pub fn destination_bucket(source_bucket: &str) -> String {
    format!("{source_bucket}{RESIZED_BUCKET_SUFFIX}")
}

/// Rewrite a `.jpg` / `.jpeg` / `.png` suffix (any case) to `.webp`.
///
/// Keys with any other suffix are returned unchanged.
pub fn destination_key(source_key: &str) -> String {
    let lower = source_key.to_ascii_lowercase();
    for suffix in [".jpeg", ".jpg", ".png"] {
        if lower.ends_with(suffix) {
            let stem = &source_key[..source_key.len() - suffix.len()];
            return format!("{stem}.webp");
        }
    }
    source_key.to_string()
}

/// Decide how to resize a `src_width` x `src_height` image into `target`.
///
/// Images are never enlarged: if the source is smaller than the box in a
/// dimension the box constrains, the image keeps its size.
pub fn plan_resize(src_width: u32, src_height: u32, target: ResizeBox) -> ResizeOp {
    match target.height {
        None => {
            if src_width <= target.width || src_width == 0 {
                return ResizeOp::Keep;
            }
            let height = (u64::from(src_height) * u64::from(target.width) + u64::from(src_width) / 2)
                / u64::from(src_width);
            ResizeOp::Scale {
                width: target.width,
                height: u32::try_from(height.max(1)).unwrap_or(u32::MAX),
            }
        }
        Some(height) => {
            if src_width < target.width || src_height < height {
                ResizeOp::Keep
            } else {
                ResizeOp::Fill {
                    width: target.width,
                    height,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_matches_path_fragments() {
        assert_eq!(
            resize_box_for_key("projectRepresentativeImage/1_a.png"),
            Some(ResizeBox { width: 324, height: Some(130) })
        );
        assert_eq!(
            resize_box_for_key("projectContentImage/1_a.jpg"),
            Some(ResizeBox { width: 666, height: None })
        );
        assert_eq!(
            resize_box_for_key("profileImage/7_b.jpeg"),
            Some(ResizeBox { width: 150, height: Some(150) })
        );
        assert_eq!(resize_box_for_key("misc/7_b.jpeg"), None);
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(supported_extension("profileImage/a.JPG").as_deref(), Some("jpg"));
        assert_eq!(supported_extension("x/y.WebP").as_deref(), Some("webp"));
        assert_eq!(supported_extension("x/y.gif"), None);
        assert_eq!(supported_extension("x/no_extension"), None);
        assert_eq!(supported_extension("dir.png/file"), None);
    }

    #[test]
    fn destination_key_rewrites_suffix() {
        assert_eq!(destination_key("profileImage/a.PNG"), "profileImage/a.webp");
        assert_eq!(destination_key("profileImage/a.jpeg"), "profileImage/a.webp");
        assert_eq!(destination_key("profileImage/a.Jpg"), "profileImage/a.webp");
        assert_eq!(destination_key("profileImage/a.webp"), "profileImage/a.webp");
    }

    #[test]
    fn destination_bucket_appends_suffix() {
        assert_eq!(destination_bucket("uploads"), "uploads-resized");
    }

    #[test]
    fn width_only_box_preserves_ratio() {
        let op = plan_resize(1332, 1000, ResizeBox { width: 666, height: None });
        assert_eq!(op, ResizeOp::Scale { width: 666, height: 500 });
    }

    #[test]
    fn narrow_images_are_not_enlarged() {
        assert_eq!(plan_resize(400, 900, ResizeBox { width: 666, height: None }), ResizeOp::Keep);
        assert_eq!(
            plan_resize(100, 400, ResizeBox { width: 150, height: Some(150) }),
            ResizeOp::Keep
        );
    }

    #[test]
    fn boxed_target_fills_and_crops() {
        assert_eq!(
            plan_resize(1000, 800, ResizeBox { width: 324, height: Some(130) }),
            ResizeOp::Fill { width: 324, height: 130 }
        );
    }
}
