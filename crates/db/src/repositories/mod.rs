//! Database repositories.
//!
//! Each repository is a zero-sized struct whose async methods take a pool
//! (or a connection when they run inside a caller's transaction).

pub mod account_repo;
pub mod bookmark_repo;
pub mod comment_repo;
pub mod contact_repo;
pub mod hashtag_repo;
pub mod member_type_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod project_image_repo;
mod project_reconcile;
pub mod project_repo;
pub mod report_repo;
pub mod session_repo;
pub mod user_repo;

pub use account_repo::AccountRepo;
pub use bookmark_repo::BookmarkRepo;
pub use comment_repo::CommentRepo;
pub use contact_repo::ContactRepo;
pub use hashtag_repo::HashtagRepo;
pub use member_type_repo::MemberTypeRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::{ListScope, ProjectRepo};
pub use report_repo::ReportRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
