//! Reminder tracker repository
//!
//! Records which (event, user, threshold) reminders have been delivered so
//! each threshold fires at most once. Rows are never updated or deleted; the
//! table grows with event volume, which is acceptable at club scale.

use sqlx::Pool;
use sqlx::Sqlite;

use crate::models::event::EventKind;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ReminderRepository {
    pool: Pool<Sqlite>,
}

impl ReminderRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Has this threshold already been delivered for this (event, user)?
    pub async fn was_sent(
        &self,
        kind: EventKind,
        event_id: i64,
        user_id: i64,
        reminder_type: &str,
    ) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reminders
            WHERE event_type = ? AND event_id = ? AND user_id = ? AND reminder_type = ?
            "#,
        )
        .bind(kind)
        .bind(event_id)
        .bind(user_id)
        .bind(reminder_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Record a delivered reminder. Idempotent: the unique key on
    /// (event_type, event_id, user_id, reminder_type) rejects the second
    /// writer even if two ticks race.
    pub async fn mark_sent(
        &self,
        kind: EventKind,
        event_id: i64,
        user_id: i64,
        reminder_type: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO reminders (event_type, event_id, user_id, reminder_type)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(kind)
        .bind(event_id)
        .bind(user_id)
        .bind(reminder_type)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
