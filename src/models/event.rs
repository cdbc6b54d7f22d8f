//! Event models
//!
//! Oneshots are single-session events, campaigns run over multiple sessions
//! and additionally carry a free-text duration. Both keep their start time as
//! the text the admin entered; `start_time()` parses it on demand and returns
//! `None` for anything outside the canonical format.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canonical date-time format for event start times, local time, no timezone.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Kind discriminator used in registration, notification and reminder keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Oneshot,
    Campaign,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Oneshot => "oneshot",
            EventKind::Campaign => "campaign",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "oneshot" => Some(EventKind::Oneshot),
            "campaign" => Some(EventKind::Campaign),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Oneshot {
    pub id: i64,
    pub name: String,
    pub date_time: String,
    pub story: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub free_drink: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub date_time: String,
    pub duration: Option<String>,
    pub story: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub free_drink: bool,
    pub created_at: NaiveDateTime,
}

/// An event of either kind, for code that handles both uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Oneshot(Oneshot),
    Campaign(Campaign),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Oneshot(_) => EventKind::Oneshot,
            Event::Campaign(_) => EventKind::Campaign,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Event::Oneshot(o) => o.id,
            Event::Campaign(c) => c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Event::Oneshot(o) => &o.name,
            Event::Campaign(c) => &c.name,
        }
    }

    pub fn date_time(&self) -> &str {
        match self {
            Event::Oneshot(o) => &o.date_time,
            Event::Campaign(c) => &c.date_time,
        }
    }

    /// Parse the stored start time. `None` means the text is not in the
    /// canonical format; callers skip status/reminder computation then.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        parse_start_time(self.date_time())
    }
}

/// Parse an event start time in the canonical format.
pub fn parse_start_time(date_time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(date_time, DATE_TIME_FORMAT).ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOneshotRequest {
    pub name: String,
    pub date_time: String,
    pub story: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub free_drink: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub date_time: String,
    pub duration: Option<String>,
    pub story: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub free_drink: bool,
}
