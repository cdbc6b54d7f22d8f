//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod notification;
pub mod registration;
pub mod reminder;
pub mod review;

// Re-export repositories
pub use event::EventRepository;
pub use notification::NotificationRepository;
pub use registration::RegistrationRepository;
pub use reminder::ReminderRepository;
pub use review::ReviewRepository;
