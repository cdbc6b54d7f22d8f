//! DiceBuddy Telegram Bot
//!
//! An event-registration assistant for a tabletop-gaming club. Admins publish
//! oneshots and campaigns, members browse and sign up, subscribe to
//! new-event notifications and leave reviews; a background scheduler sends
//! reminders ahead of each event.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use database::DatabaseService;
pub use services::{NotificationService, ReminderScheduler};
pub use utils::errors::{DiceBuddyError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
