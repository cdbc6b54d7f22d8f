//! Data models module
//!
//! Typed records for every durable entity, constructed once at the storage
//! boundary.

pub mod event;
pub mod registration;
pub mod review;

// Re-export commonly used models
pub use event::{
    parse_start_time, Campaign, CreateCampaignRequest, CreateOneshotRequest, Event, EventKind,
    Oneshot, DATE_TIME_FORMAT,
};
pub use registration::{Registration, RegistrationRecord, ReminderEntry};
pub use review::Review;
