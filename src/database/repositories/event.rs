//! Event store repository
//!
//! Owns the `oneshots` and `campaigns` tables. "Upcoming" filtering and
//! ordering are delegated to SQLite's `datetime()` so loosely formatted start
//! times still sort by their lexical ISO order; `datetime()` yields NULL for
//! text it cannot interpret, which keeps such rows out of the upcoming lists
//! while they stay fetchable by id.

use sqlx::Pool;
use sqlx::Sqlite;

use crate::models::event::{Campaign, CreateCampaignRequest, CreateOneshotRequest, Oneshot};
use crate::utils::errors::Result;

const ONESHOT_COLUMNS: &str = "id, name, date_time, story, location, price, free_drink, created_at";
const CAMPAIGN_COLUMNS: &str =
    "id, name, date_time, duration, story, location, price, free_drink, created_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: Pool<Sqlite>,
}

impl EventRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Create a new oneshot
    pub async fn create_oneshot(&self, request: CreateOneshotRequest) -> Result<Oneshot> {
        let oneshot = sqlx::query_as::<_, Oneshot>(&format!(
            r#"
            INSERT INTO oneshots (name, date_time, story, location, price, free_drink)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {ONESHOT_COLUMNS}
            "#
        ))
        .bind(request.name)
        .bind(request.date_time)
        .bind(request.story)
        .bind(request.location)
        .bind(request.price)
        .bind(request.free_drink)
        .fetch_one(&self.pool)
        .await?;

        Ok(oneshot)
    }

    /// Create a new campaign
    pub async fn create_campaign(&self, request: CreateCampaignRequest) -> Result<Campaign> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            INSERT INTO campaigns (name, date_time, duration, story, location, price, free_drink)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(request.name)
        .bind(request.date_time)
        .bind(request.duration)
        .bind(request.story)
        .bind(request.location)
        .bind(request.price)
        .bind(request.free_drink)
        .fetch_one(&self.pool)
        .await?;

        Ok(campaign)
    }

    /// Find oneshot by id
    pub async fn find_oneshot(&self, id: i64) -> Result<Option<Oneshot>> {
        let oneshot = sqlx::query_as::<_, Oneshot>(&format!(
            "SELECT {ONESHOT_COLUMNS} FROM oneshots WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(oneshot)
    }

    /// Find campaign by id
    pub async fn find_campaign(&self, id: i64) -> Result<Option<Campaign>> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campaign)
    }

    /// Get upcoming oneshots ordered by start time
    pub async fn upcoming_oneshots(&self) -> Result<Vec<Oneshot>> {
        let oneshots = sqlx::query_as::<_, Oneshot>(&format!(
            r#"
            SELECT {ONESHOT_COLUMNS} FROM oneshots
            WHERE datetime(date_time) > datetime('now', 'localtime')
            ORDER BY datetime(date_time) ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(oneshots)
    }

    /// Get upcoming campaigns ordered by start time
    pub async fn upcoming_campaigns(&self) -> Result<Vec<Campaign>> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS} FROM campaigns
            WHERE datetime(date_time) > datetime('now', 'localtime')
            ORDER BY datetime(date_time) ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(campaigns)
    }

    /// Delete oneshot; registrations for it are removed by the FK cascade
    pub async fn delete_oneshot(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM oneshots WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete campaign; registrations for it are removed by the FK cascade
    pub async fn delete_campaign(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM campaigns WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
