//! Registration ledger repository
//!
//! Uniqueness of (event, user) is enforced by the storage layer; a duplicate
//! sign-up is reported as the normal `false` outcome, not an error.

use sqlx::Pool;
use sqlx::Sqlite;

use crate::models::event::EventKind;
use crate::models::registration::{Registration, RegistrationRecord, ReminderEntry};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: Pool<Sqlite>,
}

impl RegistrationRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Register a user for an event.
    ///
    /// Returns `true` if a new registration was created, `false` if the user
    /// was already registered.
    pub async fn register(
        &self,
        kind: EventKind,
        event_id: i64,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<bool> {
        let sql = match kind {
            EventKind::Oneshot => {
                r#"
                INSERT OR IGNORE INTO oneshot_registrations (oneshot_id, user_id, username, first_name)
                VALUES (?, ?, ?, ?)
                "#
            }
            EventKind::Campaign => {
                r#"
                INSERT OR IGNORE INTO campaign_registrations (campaign_id, user_id, username, first_name)
                VALUES (?, ?, ?, ?)
                "#
            }
        };

        let result = sqlx::query(sql)
            .bind(event_id)
            .bind(user_id)
            .bind(username)
            .bind(first_name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List registrants for one event, oldest first.
    ///
    /// An unknown event id yields an empty list.
    pub async fn list_registrants(
        &self,
        kind: EventKind,
        event_id: i64,
    ) -> Result<Vec<Registration>> {
        let sql = match kind {
            EventKind::Oneshot => {
                r#"
                SELECT id, oneshot_id AS event_id, user_id, username, first_name, registered_at
                FROM oneshot_registrations
                WHERE oneshot_id = ?
                ORDER BY datetime(registered_at) ASC, id ASC
                "#
            }
            EventKind::Campaign => {
                r#"
                SELECT id, campaign_id AS event_id, user_id, username, first_name, registered_at
                FROM campaign_registrations
                WHERE campaign_id = ?
                ORDER BY datetime(registered_at) ASC, id ASC
                "#
            }
        };

        let registrations = sqlx::query_as::<_, Registration>(sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(registrations)
    }

    /// All registrations for events that have not started yet, both kinds.
    /// This is the scheduler's working set.
    pub async fn list_for_reminders(&self) -> Result<Vec<ReminderEntry>> {
        let entries = sqlx::query_as::<_, ReminderEntry>(
            r#"
            SELECT 'oneshot' AS event_type, o.id AS event_id, r.user_id, o.date_time, o.name
            FROM oneshot_registrations r
            JOIN oneshots o ON r.oneshot_id = o.id
            WHERE datetime(o.date_time) > datetime('now', 'localtime')
            UNION ALL
            SELECT 'campaign' AS event_type, c.id AS event_id, r.user_id, c.date_time, c.name
            FROM campaign_registrations r
            JOIN campaigns c ON r.campaign_id = c.id
            WHERE datetime(c.date_time) > datetime('now', 'localtime')
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// All registrations, past and future, for the admin audit list, sorted
    /// by event start time then registration time.
    pub async fn list_all(&self) -> Result<Vec<RegistrationRecord>> {
        let records = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            SELECT * FROM (
                SELECT
                    'oneshot' AS event_type,
                    o.name AS event_name,
                    o.date_time AS date_time,
                    r.user_id AS user_id,
                    r.username AS username,
                    r.first_name AS first_name,
                    r.registered_at AS registered_at
                FROM oneshot_registrations r
                JOIN oneshots o ON r.oneshot_id = o.id
                UNION ALL
                SELECT
                    'campaign' AS event_type,
                    c.name AS event_name,
                    c.date_time AS date_time,
                    r.user_id AS user_id,
                    r.username AS username,
                    r.first_name AS first_name,
                    r.registered_at AS registered_at
                FROM campaign_registrations r
                JOIN campaigns c ON r.campaign_id = c.id
            )
            ORDER BY datetime(date_time) ASC, datetime(registered_at) ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
