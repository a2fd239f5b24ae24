//! Repository for the `bookmarks` table.

use sidemate_core::types::DbId;
use sqlx::PgPool;

use crate::models::bookmark::BookmarkAction;

pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Flip the bookmark for `(user_id, project_id)`.
    ///
    /// Runs in one transaction: the existing row is deleted if present,
    /// otherwise a new one is inserted. The branch taken is returned.
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<BookmarkAction, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND project_id = $2")
            .bind(user_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let action = if deleted > 0 {
            BookmarkAction::Cancel
        } else {
            sqlx::query("INSERT INTO bookmarks (user_id, project_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(project_id)
                .execute(&mut *tx)
                .await?;
            BookmarkAction::Save
        };

        tx.commit().await?;
        Ok(action)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, project_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookmarks WHERE user_id = $1 AND project_id = $2)",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    pub async fn count_for_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookmarks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
    }
}
