//! Repository for the `reports` table.

use sidemate_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::Report;

pub struct ReportRepo;

impl ReportRepo {
    /// Record a report. A second report of the same project by the same
    /// user violates `uq_reports_project_reporter`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        reporter_id: DbId,
        reason: &str,
    ) -> Result<Report, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            "INSERT INTO reports (project_id, reporter_id, reason)
             VALUES ($1, $2, $3)
             RETURNING id, project_id, reporter_id, reason, created_at",
        )
        .bind(project_id)
        .bind(reporter_id)
        .bind(reason)
        .fetch_one(pool)
        .await
    }
}
