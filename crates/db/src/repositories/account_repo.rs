//! Account removal.

use sidemate_core::types::DbId;
use sqlx::PgPool;

use crate::models::delete_account_request::DeleteAccountRequest;

pub struct AccountRepo;

impl AccountRepo {
    /// Record a deletion request and delete the user in one transaction.
    ///
    /// Rows owned by the user (profile, sessions, projects and their
    /// sub-collections, bookmarks, comments, reports, notifications) go
    /// with it through `ON DELETE CASCADE`. Notifications the user caused
    /// for others keep their row with `actor_id` cleared.
    ///
    /// Returns `None` if the user does not exist; nothing is written then.
    pub async fn delete_user(
        pool: &PgPool,
        user_id: DbId,
        reason: Option<&str>,
    ) -> Result<Option<DeleteAccountRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let email: Option<String> =
            sqlx::query_scalar("SELECT email FROM users WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(email) = email else {
            return Ok(None);
        };

        let request = sqlx::query_as::<_, DeleteAccountRequest>(
            "INSERT INTO delete_account_requests (email, reason)
             VALUES ($1, $2)
             RETURNING id, email, reason, created_at",
        )
        .bind(&email)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(request))
    }
}
