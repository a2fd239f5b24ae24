//! Transactional write path for project updates.
//!
//! [`ProjectRepo::reconcile`] locks the project row, diffs each aspect of
//! the desired state against what is stored, writes only the deltas and
//! commits once. Any failing statement drops the transaction uncommitted,
//! which rolls back every aspect.

use sidemate_core::reconcile::{
    changed_scalar, diff_set, diff_text, plan_hashtags, AspectOutcome, HashtagPlan,
    ReconcileReport,
};
use sidemate_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::project::{Project, ProjectInput};
use crate::repositories::project_repo::COLUMNS;
use crate::repositories::{HashtagRepo, MemberTypeRepo, ProjectImageRepo, ProjectRepo};

type Tx<'a> = Transaction<'a, Postgres>;

impl ProjectRepo {
    /// Bring project `id` to the `desired` state with the fewest writes.
    ///
    /// Aspects are applied in a fixed order on one transaction. When every
    /// aspect is unchanged nothing is written and `updated_at` is left
    /// alone. Returns `sqlx::Error::RowNotFound` if the project vanished.
    pub async fn reconcile(
        pool: &PgPool,
        id: DbId,
        desired: &ProjectInput,
    ) -> Result<ReconcileReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        let existing = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let report = ReconcileReport {
            text: reconcile_text(&mut tx, &existing, desired).await?,
            images: reconcile_images(&mut tx, id, &desired.images).await?,
            hashtags: reconcile_hashtags(&mut tx, id, &desired.hashtags).await?,
            member_types: reconcile_member_types(&mut tx, id, &desired.member_types).await?,
            recruit_count: reconcile_recruit_count(&mut tx, &existing, desired.recruit_count)
                .await?,
            representative_image: reconcile_representative_image(
                &mut tx,
                &existing,
                &desired.representative_image_or_default(),
            )
            .await?,
        };

        if report.any_changed() {
            sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            project_id = id,
            changed = ?report.changed_aspects(),
            "Project reconciled",
        );
        Ok(report)
    }
}

async fn reconcile_text(
    tx: &mut Tx<'_>,
    existing: &Project,
    desired: &ProjectInput,
) -> Result<AspectOutcome, sqlx::Error> {
    let changes = diff_text(&existing.text(), &desired.text());
    if changes.is_empty() {
        return Ok(AspectOutcome::Unchanged);
    }

    sqlx::query(
        "UPDATE projects SET
            title = COALESCE($2, title),
            content_html = COALESCE($3, content_html),
            content_markdown = COALESCE($4, content_markdown)
         WHERE id = $1",
    )
    .bind(existing.id)
    .bind(&changes.title)
    .bind(&changes.content_html)
    .bind(&changes.content_markdown)
    .execute(&mut **tx)
    .await?;
    Ok(AspectOutcome::Updated)
}

async fn reconcile_images(
    tx: &mut Tx<'_>,
    project_id: DbId,
    desired: &[String],
) -> Result<AspectOutcome, sqlx::Error> {
    let existing = ProjectImageRepo::list_for_project(&mut **tx, project_id).await?;
    let delta = diff_set(&existing, desired);
    if delta.is_empty() {
        return Ok(AspectOutcome::Unchanged);
    }

    for url in &delta.to_delete {
        ProjectImageRepo::delete_one(&mut **tx, project_id, url).await?;
    }
    ProjectImageRepo::insert_many(&mut **tx, project_id, &delta.to_add).await?;
    Ok(AspectOutcome::Updated)
}

async fn reconcile_hashtags(
    tx: &mut Tx<'_>,
    project_id: DbId,
    desired: &[String],
) -> Result<AspectOutcome, sqlx::Error> {
    let existing = HashtagRepo::list_for_project(&mut **tx, project_id).await?;
    match plan_hashtags(&existing, desired) {
        HashtagPlan::Keep => Ok(AspectOutcome::Unchanged),
        HashtagPlan::Replace { insert, .. } => {
            HashtagRepo::delete_all(&mut **tx, project_id).await?;
            HashtagRepo::insert_all(&mut **tx, project_id, &insert).await?;
            Ok(AspectOutcome::Updated)
        }
    }
}

async fn reconcile_member_types(
    tx: &mut Tx<'_>,
    project_id: DbId,
    desired: &[String],
) -> Result<AspectOutcome, sqlx::Error> {
    let existing = MemberTypeRepo::list_for_project(&mut **tx, project_id).await?;
    let delta = diff_set(&existing, desired);
    if delta.is_empty() {
        return Ok(AspectOutcome::Unchanged);
    }

    for member_type in &delta.to_delete {
        MemberTypeRepo::delete_one(&mut **tx, project_id, member_type).await?;
    }
    MemberTypeRepo::insert_many(&mut **tx, project_id, &delta.to_add).await?;
    Ok(AspectOutcome::Updated)
}

async fn reconcile_recruit_count(
    tx: &mut Tx<'_>,
    existing: &Project,
    desired: i32,
) -> Result<AspectOutcome, sqlx::Error> {
    let Some(recruit_count) = changed_scalar(&existing.recruit_count, &desired) else {
        return Ok(AspectOutcome::Unchanged);
    };

    sqlx::query("UPDATE projects SET recruit_count = $2 WHERE id = $1")
        .bind(existing.id)
        .bind(recruit_count)
        .execute(&mut **tx)
        .await?;
    Ok(AspectOutcome::Updated)
}

async fn reconcile_representative_image(
    tx: &mut Tx<'_>,
    existing: &Project,
    desired: &String,
) -> Result<AspectOutcome, sqlx::Error> {
    let Some(image) = changed_scalar(&existing.representative_image, desired) else {
        return Ok(AspectOutcome::Unchanged);
    };

    sqlx::query("UPDATE projects SET representative_image = $2 WHERE id = $1")
        .bind(existing.id)
        .bind(image)
        .execute(&mut **tx)
        .await?;
    Ok(AspectOutcome::Updated)
}
