//! Repository for the `contacts` table.

use sqlx::PgPool;

use crate::models::contact::{Contact, CreateContact};

pub struct ContactRepo;

impl ContactRepo {
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (email, title, content)
             VALUES ($1, $2, $3)
             RETURNING id, email, title, content, created_at",
        )
        .bind(input.email.trim())
        .bind(input.title.trim())
        .bind(&input.content)
        .fetch_one(pool)
        .await
    }
}
