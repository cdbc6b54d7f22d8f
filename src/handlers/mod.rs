//! Telegram handlers module
//!
//! Thin presentation glue: parses updates, checks the admin allow-list and
//! calls into the database service / notification service. No domain logic
//! lives here.

pub mod callbacks;
pub mod commands;
pub mod messages;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::services::NotificationService;
use crate::state::SessionStore;

/// Everything a handler needs, injected through the dispatcher
#[derive(Clone)]
pub struct AppContext {
    pub db: DatabaseService,
    pub notifier: NotificationService,
    pub sessions: SessionStore,
    pub settings: Settings,
}

impl AppContext {
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.settings.bot.admin_ids.contains(&user_id)
    }
}

/// Main inline menu shown to ordinary users
pub fn user_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "Sign up for a oneshot",
            "view_oneshots",
        )],
        vec![InlineKeyboardButton::callback(
            "Join a campaign",
            "view_campaigns",
        )],
        vec![InlineKeyboardButton::callback(
            "Browse reviews",
            "view_reviews",
        )],
        vec![InlineKeyboardButton::callback("Leave a review", "leave_review")],
    ])
}
