//! Services module
//!
//! Business logic above the repositories: message delivery, event summary
//! rendering, subscriber fan-out and the reminder scheduler.

pub mod delivery;
pub mod formatting;
pub mod notification;
pub mod scheduler;

pub use delivery::{MessageSender, RegisterAction, TelegramSender};
pub use notification::NotificationService;
pub use scheduler::{ReminderScheduler, ReminderThreshold, REMINDER_THRESHOLDS};
