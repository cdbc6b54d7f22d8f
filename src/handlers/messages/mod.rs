//! Message handlers
//!
//! Routes plain text messages: admin menu selections and draft answers,
//! pending reviews, and everything else from ordinary users is forwarded to
//! the admins.

use teloxide::prelude::Request;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message};
use teloxide::Bot;
use tracing::warn;

use crate::handlers::commands::handle_admin_menu;
use crate::handlers::{user_menu_keyboard, AppContext};
use crate::state::{DraftPrompt, Flow};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

pub async fn handle_message(bot: Bot, msg: Message, ctx: AppContext) -> Result<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let Some(text) = msg.text() else {
        // Non-text content from users still reaches the admins
        if !ctx.is_admin(user_id) {
            forward_to_admins(&bot, &msg, &ctx).await;
            reply_forwarded(&bot, &msg, &ctx).await?;
        }
        return Ok(());
    };

    if ctx.is_admin(user_id) {
        return handle_admin_message(bot, msg.clone(), ctx, user_id, text).await;
    }

    // A user who tapped "leave review" owes us exactly one text message
    if let Some(Flow::LeavingReview) = ctx.sessions.take(user_id).await {
        use teloxide::payloads::SendMessageSetters;

        ctx.db
            .reviews
            .add(
                user_id,
                user.username.as_deref(),
                Some(user.first_name.as_str()),
                text,
            )
            .await?;
        log_user_action(user_id, "review_added", None);

        bot.send_message(msg.chat.id, "Thank you for your review!")
            .reply_markup(user_menu_keyboard())
            .send()
            .await?;
        return Ok(());
    }

    forward_to_admins(&bot, &msg, &ctx).await;
    reply_forwarded(&bot, &msg, &ctx).await?;
    Ok(())
}

/// Admin text: an answer to an in-progress draft step, or a menu selection
async fn handle_admin_message(
    bot: Bot,
    msg: Message,
    ctx: AppContext,
    admin_id: i64,
    text: &str,
) -> Result<()> {
    match ctx.sessions.take(admin_id).await {
        Some(Flow::OneshotDraft(mut draft)) => {
            let prompt = draft.apply_text(text.to_string());
            ctx.sessions.set(admin_id, Flow::OneshotDraft(draft)).await;
            ask_next(bot, &msg, prompt).await
        }
        Some(Flow::CampaignDraft(mut draft)) => {
            let prompt = draft.apply_text(text.to_string());
            ctx.sessions.set(admin_id, Flow::CampaignDraft(draft)).await;
            ask_next(bot, &msg, prompt).await
        }
        _ => {
            // No flow in progress: menu entry or noise
            handle_admin_menu(bot, &msg, &ctx, admin_id, text).await?;
            Ok(())
        }
    }
}

async fn ask_next(bot: Bot, msg: &Message, prompt: DraftPrompt) -> Result<()> {
    use teloxide::payloads::SendMessageSetters;

    if prompt == DraftPrompt::FreeDrink {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("Yes", "drink_yes"),
            InlineKeyboardButton::callback("No", "drink_no"),
        ]]);
        bot.send_message(msg.chat.id, prompt.question())
            .reply_markup(keyboard)
            .send()
            .await?;
    } else {
        bot.send_message(msg.chat.id, prompt.question()).send().await?;
    }
    Ok(())
}

/// Forward a user's message to every admin; one unreachable admin must not
/// stop the rest.
async fn forward_to_admins(bot: &Bot, msg: &Message, ctx: &AppContext) {
    for admin_id in &ctx.settings.bot.admin_ids {
        if let Err(e) = bot
            .forward_message(ChatId(*admin_id), msg.chat.id, msg.id)
            .send()
            .await
        {
            warn!(admin_id = admin_id, error = %e, "Failed to forward message to admin");
        }
    }
}

async fn reply_forwarded(bot: &Bot, msg: &Message, ctx: &AppContext) -> Result<()> {
    bot.send_message(
        msg.chat.id,
        format!(
            "Forwarded your message to the admins! To reach the game master directly: {}",
            ctx.settings.bot.dm_contact
        ),
    )
    .send()
    .await?;
    Ok(())
}
