//! Message delivery collaborator
//!
//! The core only needs "send this text to this user, optionally with a
//! sign-up shortcut, and tell me whether it worked". Everything that talks to
//! recipients goes through [`MessageSender`] so the scheduler and fan-out
//! logic can be exercised without a live Telegram connection.

use async_trait::async_trait;
use teloxide::prelude::Request;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::Bot;

use crate::models::event::EventKind;
use crate::utils::errors::Result;

/// Action descriptor attached to a delivered message; rendered by the
/// Telegram sender as an inline "Sign up" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterAction {
    pub kind: EventKind,
    pub event_id: i64,
}

impl RegisterAction {
    /// Callback payload understood by the callback handler
    pub fn callback_data(&self) -> String {
        format!("register_{}_{}", self.kind.as_str(), self.event_id)
    }
}

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, user_id: i64, text: &str, action: Option<RegisterAction>) -> Result<()>;
}

/// Production sender backed by the Telegram bot API
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, user_id: i64, text: &str, action: Option<RegisterAction>) -> Result<()> {
        use teloxide::payloads::SendMessageSetters;

        let mut request = self.bot.send_message(ChatId(user_id), text);

        if let Some(action) = action {
            let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
                "Sign up",
                action.callback_data(),
            )]]);
            request = request.reply_markup(keyboard);
        }

        request.send().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_action_callback_data() {
        let action = RegisterAction {
            kind: EventKind::Oneshot,
            event_id: 7,
        };
        assert_eq!(action.callback_data(), "register_oneshot_7");

        let action = RegisterAction {
            kind: EventKind::Campaign,
            event_id: 12,
        };
        assert_eq!(action.callback_data(), "register_campaign_12");
    }
}
