//! Callback query handlers
//!
//! Inline button presses: browsing and joining events, notification opt-in,
//! reviews, admin deletions and the final free-drink step of an event draft.

use teloxide::prelude::Request;
use teloxide::requests::Requester;
use teloxide::types::{CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::Bot;
use tracing::{debug, warn};

use crate::handlers::{user_menu_keyboard, AppContext};
use crate::models::event::{Event, EventKind};
use crate::services::delivery::RegisterAction;
use crate::services::formatting::render_event_summary;
use crate::state::Flow;
use crate::utils::errors::Result;
use crate::utils::logging::{log_admin_action, log_user_action};

pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, ctx: AppContext) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let Some(data) = query.data.clone() else {
        return Ok(());
    };

    bot.answer_callback_query(query.id.clone()).send().await?;

    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    debug!(user_id = user_id, data = %data, "Processing callback query");

    match data.as_str() {
        "view_oneshots" => view_upcoming(bot, chat_id, &ctx, EventKind::Oneshot).await,
        "view_campaigns" => view_upcoming(bot, chat_id, &ctx, EventKind::Campaign).await,
        "notify_oneshot" => subscribe(bot, chat_id, &ctx, user_id, EventKind::Oneshot).await,
        "notify_campaign" => subscribe(bot, chat_id, &ctx, user_id, EventKind::Campaign).await,
        "view_reviews" => view_reviews(bot, chat_id, &ctx).await,
        "leave_review" => start_leave_review(bot, chat_id, &ctx, user_id).await,
        "drink_yes" => finish_event_draft(bot, chat_id, &ctx, user_id, true).await,
        "drink_no" => finish_event_draft(bot, chat_id, &ctx, user_id, false).await,
        other => {
            if let Some((kind, event_id)) = parse_suffixed(other, "register_") {
                register(bot, chat_id, &ctx, &query, kind, event_id).await
            } else if let Some((kind, event_id)) = parse_suffixed(other, "delete_event_") {
                delete_event(bot, chat_id, &ctx, user_id, kind, event_id).await
            } else if let Some(review_id) = other
                .strip_prefix("delete_review_")
                .and_then(|id| id.parse::<i64>().ok())
            {
                delete_review(bot, chat_id, &ctx, user_id, review_id).await
            } else {
                warn!(user_id = user_id, data = %other, "Unknown callback data");
                Ok(())
            }
        }
    }
}

/// Parse "<prefix><kind>_<id>" callback payloads
fn parse_suffixed(data: &str, prefix: &str) -> Option<(EventKind, i64)> {
    let rest = data.strip_prefix(prefix)?;
    let (kind, id) = rest.rsplit_once('_')?;
    Some((EventKind::parse(kind)?, id.parse().ok()?))
}

/// Show the next upcoming event of a kind, or offer a notification
/// subscription when none is scheduled.
async fn view_upcoming(bot: Bot, chat_id: ChatId, ctx: &AppContext, kind: EventKind) -> Result<()> {
    use teloxide::payloads::SendMessageSetters;

    let event = match kind {
        EventKind::Oneshot => ctx
            .db
            .events
            .upcoming_oneshots()
            .await?
            .into_iter()
            .next()
            .map(Event::Oneshot),
        EventKind::Campaign => ctx
            .db
            .events
            .upcoming_campaigns()
            .await?
            .into_iter()
            .next()
            .map(Event::Campaign),
    };

    match event {
        Some(event) => {
            let action = RegisterAction {
                kind,
                event_id: event.id(),
            };
            let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
                "Sign up",
                action.callback_data(),
            )]]);
            let text = format!("Currently planned:\n\n{}", render_event_summary(&event));
            bot.send_message(chat_id, text)
                .reply_markup(keyboard)
                .send()
                .await?;
        }
        None => {
            let (text, notify_data) = match kind {
                EventKind::Oneshot => (
                    "No oneshots are scheduled at the moment",
                    "notify_oneshot",
                ),
                EventKind::Campaign => (
                    "No campaigns are scheduled at the moment",
                    "notify_campaign",
                ),
            };
            let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
                "Notify me when one appears",
                notify_data,
            )]]);
            bot.send_message(chat_id, text)
                .reply_markup(keyboard)
                .send()
                .await?;
        }
    }

    Ok(())
}

async fn subscribe(
    bot: Bot,
    chat_id: ChatId,
    ctx: &AppContext,
    user_id: i64,
    kind: EventKind,
) -> Result<()> {
    ctx.db.notifications.subscribe(user_id, kind).await?;
    log_user_action(user_id, "subscribed", Some(kind.as_str()));

    let text = match kind {
        EventKind::Oneshot => "You will be notified when a new oneshot appears!",
        EventKind::Campaign => "You will be notified when a new campaign appears!",
    };
    bot.send_message(chat_id, text).send().await?;
    Ok(())
}

async fn register(
    bot: Bot,
    chat_id: ChatId,
    ctx: &AppContext,
    query: &CallbackQuery,
    kind: EventKind,
    event_id: i64,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;

    let Some(event) = ctx.db.find_event(kind, event_id).await? else {
        bot.send_message(chat_id, "This event no longer exists.").send().await?;
        return Ok(());
    };

    let username = query.from.username.as_deref();
    let first_name = Some(query.from.first_name.as_str());

    let newly_registered = ctx
        .db
        .registrations
        .register(kind, event_id, user_id, username, first_name)
        .await?;

    if newly_registered {
        log_user_action(user_id, "registered", Some(event.name()));
        bot.send_message(
            chat_id,
            format!(
                "Thank you! You are signed up for \"{}\". I will send you a reminder closer to the day!",
                event.name()
            ),
        )
        .send()
        .await?;

        ctx.notifier
            .notify_admins_new_registration(&event, username, first_name)
            .await?;
    } else {
        bot.send_message(chat_id, "You are already signed up for this event!")
            .send()
            .await?;
    }

    Ok(())
}

async fn view_reviews(bot: Bot, chat_id: ChatId, ctx: &AppContext) -> Result<()> {
    use teloxide::payloads::SendMessageSetters;

    let reviews = ctx.db.reviews.list_all().await?;

    let text = if reviews.is_empty() {
        "No reviews yet.".to_string()
    } else {
        let mut text = String::from("Reviews:\n\n");
        for review in reviews {
            text.push_str(&format!(
                "{} ({}):\n{}\n\n",
                review.author_label(),
                review.created_at.format("%Y-%m-%d %H:%M"),
                review.text
            ));
        }
        text
    };

    bot.send_message(chat_id, text)
        .reply_markup(user_menu_keyboard())
        .send()
        .await?;
    Ok(())
}

async fn start_leave_review(bot: Bot, chat_id: ChatId, ctx: &AppContext, user_id: i64) -> Result<()> {
    // Reviews come from club members, not admins
    if ctx.is_admin(user_id) {
        return Ok(());
    }

    ctx.sessions.set(user_id, Flow::LeavingReview).await;
    bot.send_message(chat_id, "Write your review in a single message:")
        .send()
        .await?;
    Ok(())
}

async fn delete_event(
    bot: Bot,
    chat_id: ChatId,
    ctx: &AppContext,
    user_id: i64,
    kind: EventKind,
    event_id: i64,
) -> Result<()> {
    if !ctx.is_admin(user_id) {
        warn!(user_id = user_id, "Non-admin attempted event deletion");
        return Ok(());
    }

    ctx.db.delete_event(kind, event_id).await?;
    log_admin_action(user_id, "delete_event", Some(&format!("{}_{}", kind, event_id)));

    let text = match kind {
        EventKind::Oneshot => "Oneshot deleted.",
        EventKind::Campaign => "Campaign deleted.",
    };
    bot.send_message(chat_id, text).send().await?;
    Ok(())
}

async fn delete_review(
    bot: Bot,
    chat_id: ChatId,
    ctx: &AppContext,
    user_id: i64,
    review_id: i64,
) -> Result<()> {
    if !ctx.is_admin(user_id) {
        warn!(user_id = user_id, "Non-admin attempted review deletion");
        return Ok(());
    }

    ctx.db.reviews.delete(review_id).await?;
    log_admin_action(user_id, "delete_review", Some(&review_id.to_string()));
    bot.send_message(chat_id, "Review deleted.").send().await?;
    Ok(())
}

/// Final draft step: the free-drink answer arrives as a button press. The
/// event is stored and immediately announced to everyone subscribed to its
/// kind.
async fn finish_event_draft(
    bot: Bot,
    chat_id: ChatId,
    ctx: &AppContext,
    user_id: i64,
    free_drink: bool,
) -> Result<()> {
    if !ctx.is_admin(user_id) {
        return Ok(());
    }

    let event = match ctx.sessions.take(user_id).await {
        Some(Flow::OneshotDraft(draft)) => match draft.finish(free_drink) {
            Some(request) => Event::Oneshot(ctx.db.create_oneshot(request).await?),
            None => {
                bot.send_message(chat_id, "The draft is incomplete, start over with the menu.")
                    .send()
                    .await?;
                return Ok(());
            }
        },
        Some(Flow::CampaignDraft(draft)) => match draft.finish(free_drink) {
            Some(request) => Event::Campaign(ctx.db.create_campaign(request).await?),
            None => {
                bot.send_message(chat_id, "The draft is incomplete, start over with the menu.")
                    .send()
                    .await?;
                return Ok(());
            }
        },
        _ => return Ok(()),
    };

    log_admin_action(user_id, "event_published", Some(event.name()));
    ctx.notifier.announce_new_event(&event).await?;

    let text = match event.kind() {
        EventKind::Oneshot => format!("Oneshot '{}' has been published!", event.name()),
        EventKind::Campaign => format!("Campaign '{}' has been published!", event.name()),
    };
    bot.send_message(chat_id, text).send().await?;
    Ok(())
}
