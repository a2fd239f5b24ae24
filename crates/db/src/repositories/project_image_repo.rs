//! Repository for the `project_images` table.

use sidemate_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

/// Image URLs attached to a project body.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Image URLs of one project, in insertion order.
    pub async fn list_for_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT url FROM project_images WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(executor)
        .await
    }

    /// Insert all `urls` for a project in one statement.
    pub async fn insert_many(
        conn: &mut PgConnection,
        project_id: DbId,
        urls: &[String],
    ) -> Result<u64, sqlx::Error> {
        if urls.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO project_images (project_id, url)
             SELECT $1, UNNEST($2::TEXT[])",
        )
        .bind(project_id)
        .bind(urls)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete one image by `(project_id, url)`. Returns `true` if a row was removed.
    pub async fn delete_one(
        conn: &mut PgConnection,
        project_id: DbId,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_images WHERE project_id = $1 AND url = $2")
            .bind(project_id)
            .bind(url)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
