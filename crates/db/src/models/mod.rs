//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for request payloads

pub mod bookmark;
pub mod comment;
pub mod contact;
pub mod delete_account_request;
pub mod notification;
pub mod profile;
pub mod project;
pub mod report;
pub mod session;
pub mod user;
