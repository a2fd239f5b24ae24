//! Image resize service.
//!
//! Receives either an object-storage trigger event or a direct invoke
//! payload, fetches each source image, applies the resize policy from
//! `sidemate_core::image_resize` and writes a WebP variant into the
//! `-resized` companion bucket.

pub mod config;
pub mod error;
pub mod payload;
pub mod processor;
pub mod router;
pub mod store;
pub mod transcode;
