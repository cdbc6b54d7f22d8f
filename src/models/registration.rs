//! Registration models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::event::EventKind;

/// One (event, user) sign-up row. At most one exists per pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub registered_at: NaiveDateTime,
}

/// Registration joined with its event, restricted to future events.
/// This is what the reminder scheduler iterates over.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReminderEntry {
    pub event_type: EventKind,
    pub event_id: i64,
    pub user_id: i64,
    pub date_time: String,
    pub name: String,
}

/// Registration joined with its event, all events, for the admin audit list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistrationRecord {
    pub event_type: EventKind,
    pub event_name: String,
    pub date_time: String,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub registered_at: NaiveDateTime,
}
