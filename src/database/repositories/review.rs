//! Review log repository
//!
//! Append-only except for admin deletion; no edit operation, no moderation
//! queue. Reviews are visible the moment they are stored.

use sqlx::Pool;
use sqlx::Sqlite;

use crate::models::review::Review;
use crate::utils::errors::Result;

const REVIEW_COLUMNS: &str = "id, user_id, username, first_name, text, created_at";

#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: Pool<Sqlite>,
}

impl ReviewRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Add a review
    pub async fn add(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
        text: &str,
    ) -> Result<Review> {
        let review = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (user_id, username, first_name, text)
            VALUES (?, ?, ?, ?)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(username)
        .bind(first_name)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    /// All reviews, newest first
    pub async fn list_all(&self) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY datetime(created_at) DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Most recent reviews, newest first
    pub async fn latest(&self, limit: i64) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS} FROM reviews
            ORDER BY datetime(created_at) DESC, id DESC
            LIMIT ?
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Delete a review (admin only, enforced by the caller)
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
