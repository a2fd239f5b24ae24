//! Repository for the `hashtags` table.
//!
//! Hashtags are an ordered list per project; `position` preserves the order
//! the author entered them in.

use sidemate_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::project::ProjectValue;

pub struct HashtagRepo;

impl HashtagRepo {
    /// Hashtags of one project, in list order.
    pub async fn list_for_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT tag_name FROM hashtags WHERE project_id = $1 ORDER BY position, id",
        )
        .bind(project_id)
        .fetch_all(executor)
        .await
    }

    /// Hashtags of many projects, ordered by project then position.
    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectValue>, sqlx::Error> {
        sqlx::query_as::<_, ProjectValue>(
            "SELECT project_id, tag_name AS value FROM hashtags
             WHERE project_id = ANY($1)
             ORDER BY project_id, position, id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert `tags` in order, numbering positions from zero.
    pub async fn insert_all(
        conn: &mut PgConnection,
        project_id: DbId,
        tags: &[String],
    ) -> Result<u64, sqlx::Error> {
        if tags.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO hashtags (project_id, tag_name, position)
             SELECT $1, t.tag_name, (t.ord - 1)::INTEGER
             FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(tag_name, ord)",
        )
        .bind(project_id)
        .bind(tags)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every hashtag row of a project. Returns the number removed.
    pub async fn delete_all(conn: &mut PgConnection, project_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hashtags WHERE project_id = $1")
            .bind(project_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
