//! Domain logic shared by the API server, the persistence layer and the
//! image resize service.
//!
//! Nothing in this crate touches the network or the database; every
//! function is deterministic so it can be unit tested in isolation.

pub mod error;
pub mod image_resize;
pub mod member_type;
pub mod pagination;
pub mod reconcile;
pub mod storage;
pub mod types;
pub mod validation;
