//! Notification subscription registry
//!
//! Tracks users who asked to be told when an event of a given kind appears.
//! Subscriptions are never deleted after firing; subscribers keep being
//! notified on every subsequent new event of that kind.

use sqlx::Pool;
use sqlx::Sqlite;

use crate::models::event::EventKind;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: Pool<Sqlite>,
}

impl NotificationRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Subscribe a user to new-event notifications for a kind.
    /// Subscribing twice is a silent no-op.
    pub async fn subscribe(&self, user_id: i64, kind: EventKind) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO notifications (user_id, event_type) VALUES (?, ?)")
            .bind(user_id)
            .bind(kind)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All users awaiting a new event of this kind
    pub async fn subscribers(&self, kind: EventKind) -> Result<Vec<i64>> {
        let user_ids =
            sqlx::query_scalar::<_, i64>("SELECT user_id FROM notifications WHERE event_type = ?")
                .bind(kind)
                .fetch_all(&self.pool)
                .await?;

        Ok(user_ids)
    }
}
