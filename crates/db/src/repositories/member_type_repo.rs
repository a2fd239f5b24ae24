//! Repository for the `member_types` table.

use sidemate_core::member_type::sort_member_types;
use sidemate_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::project::ProjectValue;

pub struct MemberTypeRepo;

impl MemberTypeRepo {
    /// Member types of one project, in display order.
    pub async fn list_for_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let mut types = sqlx::query_scalar::<_, String>(
            "SELECT type FROM member_types WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(executor)
        .await?;
        sort_member_types(&mut types);
        Ok(types)
    }

    /// Member types of many projects (unsorted within a project).
    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectValue>, sqlx::Error> {
        sqlx::query_as::<_, ProjectValue>(
            "SELECT project_id, type AS value FROM member_types
             WHERE project_id = ANY($1)
             ORDER BY project_id, id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }

    pub async fn insert_many(
        conn: &mut PgConnection,
        project_id: DbId,
        member_types: &[String],
    ) -> Result<u64, sqlx::Error> {
        if member_types.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO member_types (project_id, type)
             SELECT $1, UNNEST($2::TEXT[])",
        )
        .bind(project_id)
        .bind(member_types)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete one member type of a project. Returns `true` if a row was removed.
    pub async fn delete_one(
        conn: &mut PgConnection,
        project_id: DbId,
        member_type: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM member_types WHERE project_id = $1 AND type = $2")
            .bind(project_id)
            .bind(member_type)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
