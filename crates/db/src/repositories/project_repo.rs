//! Repository for the `projects` table.
//!
//! Create and delete touch every sub-collection table inside one
//! transaction. Updates go through [`ProjectRepo::reconcile`] (see
//! `project_reconcile.rs`).

use std::collections::HashMap;

use sidemate_core::member_type::sort_member_types;
use sidemate_core::reconcile::diff_set;
use sidemate_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{
    Project, ProjectDetail, ProjectInput, ProjectListParams, ProjectListRow, ProjectSort,
    ProjectSummary, ProjectValue,
};
use crate::repositories::{BookmarkRepo, HashtagRepo, MemberTypeRepo, ProjectImageRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, user_id, title, content_html, content_markdown, views, \
    recruit_count, representative_image, created_at, updated_at";

/// Which projects a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    /// Projects written by this user.
    Author(DbId),
    /// Projects this user bookmarked.
    BookmarkedBy(DbId),
}

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project with its images, hashtags and member types.
    ///
    /// All rows are written in one transaction. Duplicate image URLs and
    /// member types in `input` are collapsed.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &ProjectInput,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects
                (user_id, title, content_html, content_markdown, recruit_count, representative_image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.content_html)
            .bind(&input.content_markdown)
            .bind(input.recruit_count)
            .bind(input.representative_image_or_default())
            .fetch_one(&mut *tx)
            .await?;

        let images = diff_set(&[], &input.images).to_add;
        let member_types = diff_set(&[], &input.member_types).to_add;

        ProjectImageRepo::insert_many(&mut *tx, project.id, &images).await?;
        HashtagRepo::insert_all(&mut *tx, project.id, &input.hashtags).await?;
        MemberTypeRepo::insert_many(&mut *tx, project.id, &member_types).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a project with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Increment the view counter and return the updated row.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET views = views + 1 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the full detail view of a project, counting one view.
    ///
    /// `viewer_id` personalises `is_bookmarked`. Returns `None` if the
    /// project does not exist.
    pub async fn view_detail(
        pool: &PgPool,
        id: DbId,
        viewer_id: Option<DbId>,
    ) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let Some(project) = Self::increment_views(pool, id).await? else {
            return Ok(None);
        };

        let author = UserRepo::find_author(pool, project.user_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let images = ProjectImageRepo::list_for_project(pool, id).await?;
        let hashtags = HashtagRepo::list_for_project(pool, id).await?;
        let member_types = MemberTypeRepo::list_for_project(pool, id).await?;
        let bookmark_count = BookmarkRepo::count_for_project(pool, id).await?;
        let is_bookmarked = match viewer_id {
            Some(user_id) => BookmarkRepo::exists(pool, user_id, id).await?,
            None => false,
        };

        Ok(Some(ProjectDetail {
            project,
            author,
            images,
            hashtags,
            member_types,
            bookmark_count,
            is_bookmarked,
        }))
    }

    /// List projects with filters, sorting and pagination.
    ///
    /// Hashtags and member types are loaded with one batch query each and
    /// attached to every row.
    pub async fn list(
        pool: &PgPool,
        params: &ProjectListParams,
        scope: ListScope,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let (author_id, bookmarked_by) = match scope {
            ListScope::All => (None, None),
            ListScope::Author(user_id) => (Some(user_id), None),
            ListScope::BookmarkedBy(user_id) => (None, Some(user_id)),
        };
        let order_by = match params.sort {
            ProjectSort::Latest => "p.created_at DESC, p.id DESC",
            ProjectSort::Popular => "p.views DESC, p.created_at DESC, p.id DESC",
        };

        let query = format!(
            "SELECT p.id, p.title, p.views, p.recruit_count, p.representative_image,
                    p.created_at, p.updated_at,
                    u.id AS author_id, u.nickname AS author_nickname,
                    (SELECT COUNT(*) FROM bookmarks b WHERE b.project_id = p.id) AS bookmark_count,
                    (SELECT COUNT(*) FROM comments c WHERE c.project_id = p.id) AS comment_count
             FROM projects p
             JOIN users u ON u.id = p.user_id
             WHERE ($1::TEXT IS NULL OR EXISTS (
                        SELECT 1 FROM hashtags h WHERE h.project_id = p.id AND h.tag_name = $1))
               AND ($2::TEXT IS NULL OR EXISTS (
                        SELECT 1 FROM member_types m WHERE m.project_id = p.id AND m.type = $2))
               AND ($3::TEXT IS NULL OR p.title ILIKE '%' || $3 || '%')
               AND ($4::BIGINT IS NULL OR p.user_id = $4)
               AND ($5::BIGINT IS NULL OR EXISTS (
                        SELECT 1 FROM bookmarks bk WHERE bk.project_id = p.id AND bk.user_id = $5))
             ORDER BY {order_by}
             LIMIT $6 OFFSET $7"
        );
        let rows = sqlx::query_as::<_, ProjectListRow>(&query)
            .bind(params.hashtag.as_deref())
            .bind(params.member_type.as_deref())
            .bind(params.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()))
            .bind(author_id)
            .bind(bookmarked_by)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut hashtags = group_by_project(HashtagRepo::list_for_projects(pool, &ids).await?);
        let mut member_types =
            group_by_project(MemberTypeRepo::list_for_projects(pool, &ids).await?);

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut types = member_types.remove(&row.id).unwrap_or_default();
                sort_member_types(&mut types);
                ProjectSummary {
                    hashtags: hashtags.remove(&row.id).unwrap_or_default(),
                    member_types: types,
                    row,
                }
            })
            .collect())
    }

    /// Delete a project and every row that references it, in one transaction.
    ///
    /// Returns `true` if the project row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for table in [
            "project_images",
            "hashtags",
            "member_types",
            "bookmarks",
            "comments",
            "reports",
            "notifications",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE project_id = $1"))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Group `(project_id, value)` rows, keeping row order within a project.
fn group_by_project(rows: Vec<ProjectValue>) -> HashMap<DbId, Vec<String>> {
    let mut grouped: HashMap<DbId, Vec<String>> = HashMap::new();
    for row in rows {
        grouped.entry(row.project_id).or_default().push(row.value);
    }
    grouped
}
