//! Admin panel handlers
//!
//! Reply-keyboard menu actions. Callers must have checked the admin
//! allow-list already; these functions assume an admin.

use teloxide::prelude::Request;
use teloxide::requests::Requester;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message};
use teloxide::Bot;

use crate::handlers::commands::start::{
    MENU_ADD_CAMPAIGN, MENU_ADD_ONESHOT, MENU_ALL_REGISTRATIONS, MENU_DELETE_EVENT,
    MENU_DELETE_REVIEW,
};
use crate::handlers::AppContext;
use crate::models::event::EventKind;
use crate::state::{CampaignDraft, Flow, OneshotDraft};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

/// Dispatch an admin reply-keyboard selection. Returns `false` when the text
/// is not a menu entry so the caller can fall through.
pub async fn handle_admin_menu(
    bot: Bot,
    msg: &Message,
    ctx: &AppContext,
    admin_id: i64,
    text: &str,
) -> Result<bool> {
    match text {
        MENU_ADD_ONESHOT => {
            let draft = OneshotDraft::default();
            let prompt = draft.next_prompt();
            ctx.sessions.set(admin_id, Flow::OneshotDraft(draft)).await;
            bot.send_message(msg.chat.id, prompt.question()).send().await?;
            Ok(true)
        }
        MENU_ADD_CAMPAIGN => {
            let draft = CampaignDraft::default();
            let prompt = draft.next_prompt();
            ctx.sessions.set(admin_id, Flow::CampaignDraft(draft)).await;
            bot.send_message(msg.chat.id, prompt.question()).send().await?;
            Ok(true)
        }
        MENU_ALL_REGISTRATIONS => {
            show_all_registrations(bot, msg, ctx).await?;
            Ok(true)
        }
        MENU_DELETE_EVENT => {
            start_delete_event(bot, msg, ctx, admin_id).await?;
            Ok(true)
        }
        MENU_DELETE_REVIEW => {
            start_delete_review(bot, msg, ctx, admin_id).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Full registration audit list, every event past and future
async fn show_all_registrations(bot: Bot, msg: &Message, ctx: &AppContext) -> Result<()> {
    let records = ctx.db.registrations.list_all().await?;

    if records.is_empty() {
        bot.send_message(msg.chat.id, "No registrations yet.").send().await?;
        return Ok(());
    }

    let mut lines = Vec::new();
    for record in records {
        let user_label = match (&record.username, &record.first_name) {
            (Some(username), _) => format!("@{}", username),
            (None, Some(first_name)) => first_name.clone(),
            (None, None) => "User".to_string(),
        };
        let kind_label = match record.event_type {
            EventKind::Oneshot => "Oneshot",
            EventKind::Campaign => "Campaign",
        };
        lines.push(format!(
            "{}: \"{}\"\nUser {}, id {}",
            kind_label, record.event_name, user_label, record.user_id
        ));
    }

    let text = format!("All registrations:\n\n{}", lines.join("\n\n"));
    bot.send_message(msg.chat.id, text).send().await?;
    Ok(())
}

/// Offer upcoming events for deletion as inline buttons
async fn start_delete_event(bot: Bot, msg: &Message, ctx: &AppContext, admin_id: i64) -> Result<()> {
    use teloxide::payloads::SendMessageSetters;

    let oneshots = ctx.db.events.upcoming_oneshots().await?;
    let campaigns = ctx.db.events.upcoming_campaigns().await?;

    if oneshots.is_empty() && campaigns.is_empty() {
        bot.send_message(msg.chat.id, "No events to delete yet.").send().await?;
        return Ok(());
    }

    let mut keyboard = Vec::new();
    for oneshot in &oneshots {
        keyboard.push(vec![InlineKeyboardButton::callback(
            format!("Oneshot: {} ({})", oneshot.name, oneshot.date_time),
            format!("delete_event_oneshot_{}", oneshot.id),
        )]);
    }
    for campaign in &campaigns {
        keyboard.push(vec![InlineKeyboardButton::callback(
            format!("Campaign: {} ({})", campaign.name, campaign.date_time),
            format!("delete_event_campaign_{}", campaign.id),
        )]);
    }

    log_admin_action(admin_id, "delete_event_menu", None);
    bot.send_message(msg.chat.id, "Choose an event to delete:")
        .reply_markup(InlineKeyboardMarkup::new(keyboard))
        .send()
        .await?;
    Ok(())
}

/// Offer existing reviews for deletion as inline buttons
async fn start_delete_review(bot: Bot, msg: &Message, ctx: &AppContext, admin_id: i64) -> Result<()> {
    use teloxide::payloads::SendMessageSetters;

    let reviews = ctx.db.reviews.list_all().await?;

    if reviews.is_empty() {
        bot.send_message(msg.chat.id, "No reviews to delete yet.").send().await?;
        return Ok(());
    }

    let mut keyboard = Vec::new();
    for review in &reviews {
        let label = format!(
            "{} ({})",
            review.author_label(),
            review.created_at.format("%Y-%m-%d %H:%M")
        );
        keyboard.push(vec![InlineKeyboardButton::callback(
            format!("Delete: {}", label),
            format!("delete_review_{}", review.id),
        )]);
    }

    log_admin_action(admin_id, "delete_review_menu", None);
    bot.send_message(msg.chat.id, "Choose a review to delete:")
        .reply_markup(InlineKeyboardMarkup::new(keyboard))
        .send()
        .await?;
    Ok(())
}
