//! /start command handler

use teloxide::prelude::Request;
use teloxide::requests::Requester;
use teloxide::types::{KeyboardButton, KeyboardMarkup, Message};
use teloxide::Bot;
use tracing::debug;

use crate::handlers::{user_menu_keyboard, AppContext};
use crate::utils::errors::{DiceBuddyError, Result};

pub const MENU_ADD_ONESHOT: &str = "Add oneshot";
pub const MENU_ADD_CAMPAIGN: &str = "Add campaign";
pub const MENU_ALL_REGISTRATIONS: &str = "All registrations";
pub const MENU_DELETE_EVENT: &str = "Delete event";
pub const MENU_DELETE_REVIEW: &str = "Delete review";

/// Greet the user: admins get the admin reply keyboard, everyone else the
/// inline event menu.
pub async fn handle_start(bot: Bot, msg: Message, ctx: AppContext) -> Result<()> {
    use teloxide::payloads::SendMessageSetters;

    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| DiceBuddyError::InvalidInput("No user in message".to_string()))?;
    let user_id = user.id.0 as i64;

    debug!(user_id = user_id, "Processing /start command");

    // Any in-progress flow is abandoned on /start
    ctx.sessions.clear(user_id).await;

    if ctx.is_admin(user_id) {
        let keyboard = KeyboardMarkup::new(vec![
            vec![KeyboardButton::new(MENU_ADD_ONESHOT)],
            vec![KeyboardButton::new(MENU_ADD_CAMPAIGN)],
            vec![KeyboardButton::new(MENU_ALL_REGISTRATIONS)],
            vec![KeyboardButton::new(MENU_DELETE_EVENT)],
            vec![KeyboardButton::new(MENU_DELETE_REVIEW)],
        ]);
        bot.send_message(msg.chat.id, "Welcome to the admin panel!\n\nChoose an action:")
            .reply_markup(keyboard)
            .send()
            .await?;
    } else {
        bot.send_message(
            msg.chat.id,
            "Welcome to the tabletop club! 🎲\n\nChoose what you would like to join:",
        )
        .reply_markup(user_menu_keyboard())
        .send()
        .await?;
    }

    Ok(())
}

/// /cancel drops whatever flow is in progress
pub async fn handle_cancel(bot: Bot, msg: Message, ctx: AppContext) -> Result<()> {
    if let Some(user) = msg.from.as_ref() {
        ctx.sessions.clear(user.id.0 as i64).await;
    }
    bot.send_message(msg.chat.id, "Cancelled.").send().await?;
    Ok(())
}
