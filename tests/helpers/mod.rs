//! Shared test utilities: in-memory database setup, request builders and a
//! recording message sender.

#![allow(dead_code)]

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Local};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use DiceBuddy::database::{DatabasePool, DatabaseService};
use DiceBuddy::models::event::{CreateCampaignRequest, CreateOneshotRequest, DATE_TIME_FORMAT};
use DiceBuddy::services::delivery::{MessageSender, RegisterAction};
use DiceBuddy::utils::errors::{DiceBuddyError, Result};

/// In-memory SQLite pool with the full schema applied. A single connection is
/// used so every query sees the same in-memory database.
pub async fn test_pool() -> DatabasePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    pool
}

pub async fn test_db() -> DatabaseService {
    DatabaseService::new(test_pool().await)
}

/// Canonical-format start time `hours` from the real wall clock
pub fn start_in_hours(hours: i64) -> String {
    (Local::now().naive_local() + Duration::hours(hours))
        .format(DATE_TIME_FORMAT)
        .to_string()
}

/// Canonical-format start time `days` from the real wall clock
pub fn start_in_days(days: i64) -> String {
    (Local::now().naive_local() + Duration::days(days))
        .format(DATE_TIME_FORMAT)
        .to_string()
}

pub fn oneshot_request(name: &str, date_time: &str) -> CreateOneshotRequest {
    CreateOneshotRequest {
        name: name.to_string(),
        date_time: date_time.to_string(),
        story: Some("A mysterious cellar under the tavern".to_string()),
        location: Some("Club basement".to_string()),
        price: Some("10 eur".to_string()),
        free_drink: false,
    }
}

pub fn campaign_request(name: &str, date_time: &str) -> CreateCampaignRequest {
    CreateCampaignRequest {
        name: name.to_string(),
        date_time: date_time.to_string(),
        duration: Some("8 sessions".to_string()),
        story: Some("A slow descent into the Underdark".to_string()),
        location: Some("Back room".to_string()),
        price: Some("15 eur per session".to_string()),
        free_drink: true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub user_id: i64,
    pub text: String,
    pub action: Option<RegisterAction>,
}

/// Message sender that records deliveries and can be told to fail for
/// specific recipients.
#[derive(Default)]
pub struct MockSender {
    sent: Mutex<Vec<SentMessage>>,
    failing: Mutex<HashSet<i64>>,
}

impl MockSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make deliveries to this recipient fail until cleared
    pub fn fail_for(&self, user_id: i64) {
        self.failing.lock().unwrap().insert(user_id);
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, user_id: i64) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.user_id == user_id)
            .collect()
    }
}

#[async_trait]
impl MessageSender for MockSender {
    async fn send(&self, user_id: i64, text: &str, action: Option<RegisterAction>) -> Result<()> {
        if self.failing.lock().unwrap().contains(&user_id) {
            return Err(DiceBuddyError::InvalidInput(format!(
                "recipient {} unreachable",
                user_id
            )));
        }

        self.sent.lock().unwrap().push(SentMessage {
            user_id,
            text: text.to_string(),
            action,
        });
        Ok(())
    }
}
