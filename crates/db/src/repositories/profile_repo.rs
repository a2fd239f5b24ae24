//! Repository for the `profiles` table.

use sidemate_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

const COLUMNS: &str = "user_id, introduction, position, github_url, blog_url, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create the profile row on first write, otherwise merge non-`None` fields.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, introduction, position, github_url, blog_url)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id) DO UPDATE SET
                introduction = COALESCE(EXCLUDED.introduction, profiles.introduction),
                position = COALESCE(EXCLUDED.position, profiles.position),
                github_url = COALESCE(EXCLUDED.github_url, profiles.github_url),
                blog_url = COALESCE(EXCLUDED.blog_url, profiles.blog_url)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.introduction)
            .bind(&input.position)
            .bind(&input.github_url)
            .bind(&input.blog_url)
            .fetch_one(pool)
            .await
    }
}
