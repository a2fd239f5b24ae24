/// Failure while resizing one object.
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    #[error("Invalid source location: {0}")]
    Source(String),

    #[error("No source bucket for '{0}'")]
    MissingBucket(String),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("WebP encoding failed: {0}")]
    Encode(String),
}
