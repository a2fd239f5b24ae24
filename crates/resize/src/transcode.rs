//! Decode, resize and re-encode as WebP.

use image::imageops::FilterType;
use image::DynamicImage;
use sidemate_core::image_resize::{plan_resize, ResizeBox, ResizeOp};

use crate::error::ResizeError;

/// Lossy WebP quality of every written variant.
pub const WEBP_QUALITY: f32 = 100.0;

/// Resize `source` into `target` (if any) and encode the result as WebP.
///
/// The source format is sniffed from its bytes. Output is lossy WebP at
/// [`WEBP_QUALITY`].
pub fn transcode_to_webp(source: &[u8], target: Option<ResizeBox>) -> Result<Vec<u8>, ResizeError> {
    let image = image::load_from_memory(source)?;
    let op = target
        .map(|target| plan_resize(image.width(), image.height(), target))
        .unwrap_or(ResizeOp::Keep);
    let resized = apply(image, op);

    let rgba = resized.to_rgba8();
    let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
        .encode_simple(false, WEBP_QUALITY)
        .map_err(|e| ResizeError::Encode(format!("{e:?}")))?;
    Ok(encoded.to_vec())
}

fn apply(image: DynamicImage, op: ResizeOp) -> DynamicImage {
    match op {
        ResizeOp::Keep => image,
        ResizeOp::Scale { width, height } => image.resize_exact(width, height, FilterType::Lanczos3),
        ResizeOp::Fill { width, height } => image.resize_to_fill(width, height, FilterType::Lanczos3),
    }
}
