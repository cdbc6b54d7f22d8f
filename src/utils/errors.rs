//! Error handling for DiceBuddy
//!
//! One error enum for the whole application. Duplicate registrations,
//! duplicate subscriptions and already-sent reminders are *not* errors;
//! repositories report those as boolean outcomes.

use thiserror::Error;

/// Main error type for DiceBuddy
#[derive(Error, Debug)]
pub enum DiceBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for DiceBuddy operations
pub type Result<T> = std::result::Result<T, DiceBuddyError>;

impl DiceBuddyError {
    /// Delivery-side errors are retried on the next scheduler tick or user
    /// action; storage and configuration errors are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DiceBuddyError::Telegram(_) | DiceBuddyError::Io(_))
    }
}
