//! Project entity model, sub-collection views and DTOs.

use serde::{Deserialize, Serialize};
use sidemate_core::reconcile::ProjectText;
use sidemate_core::storage::DEFAULT_REPRESENTATIVE_IMAGE;
use sidemate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::user::AuthorInfo;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content_html: String,
    pub content_markdown: String,
    pub views: i64,
    pub recruit_count: i32,
    pub representative_image: String,
    pub created_at: Timestamp,
    /// Set only when an update actually changed something.
    pub updated_at: Option<Timestamp>,
}

impl Project {
    pub fn text(&self) -> ProjectText {
        ProjectText {
            title: self.title.clone(),
            content_html: self.content_html.clone(),
            content_markdown: self.content_markdown.clone(),
        }
    }
}

/// One row of a project listing, joined with author and counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectListRow {
    pub id: DbId,
    pub title: String,
    pub views: i64,
    pub recruit_count: i32,
    pub representative_image: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub author_id: DbId,
    pub author_nickname: String,
    pub bookmark_count: i64,
    pub comment_count: i64,
}

/// Listing entry with its hashtags and member types attached.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub row: ProjectListRow,
    pub hashtags: Vec<String>,
    pub member_types: Vec<String>,
}

/// Full project view returned by the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub author: AuthorInfo,
    pub images: Vec<String>,
    pub hashtags: Vec<String>,
    pub member_types: Vec<String>,
    pub bookmark_count: i64,
    /// Whether the requesting user has bookmarked the project.
    /// Always `false` for anonymous requests.
    pub is_bookmarked: bool,
}

/// A `(project_id, value)` pair used when batch-loading sub-collections.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectValue {
    pub project_id: DbId,
    pub value: String,
}

/// Request payload for creating a project, and the desired state for an update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    pub content_html: String,
    pub content_markdown: String,
    pub hashtags: Vec<String>,
    pub member_types: Vec<String>,
    pub recruit_count: i32,
    #[serde(default)]
    pub images: Vec<String>,
    pub representative_image: Option<String>,
}

impl ProjectInput {
    pub fn text(&self) -> ProjectText {
        ProjectText {
            title: self.title.clone(),
            content_html: self.content_html.clone(),
            content_markdown: self.content_markdown.clone(),
        }
    }

    /// Representative image with the default marker substituted for a missing value.
    pub fn representative_image_or_default(&self) -> String {
        match self.representative_image.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => DEFAULT_REPRESENTATIVE_IMAGE.to_string(),
        }
    }
}

/// Sort order for project listings.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSort {
    #[default]
    Latest,
    Popular,
}

/// Query parameters for `GET /api/v1/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub hashtag: Option<String>,
    pub member_type: Option<String>,
    pub keyword: Option<String>,
    #[serde(default)]
    pub sort: ProjectSort,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
