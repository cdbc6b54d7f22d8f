//! DiceBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Update;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use DiceBuddy::{
    config::Settings,
    database::{connection::create_pool, run_migrations, DatabaseService},
    handlers::{
        callbacks::handle_callback_query,
        commands::{handle_cancel, handle_start},
        messages::handle_message,
        AppContext,
    },
    services::{
        delivery::{MessageSender, TelegramSender},
        NotificationService, ReminderScheduler,
    },
    state::SessionStore,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "DiceBuddy Bot Commands")]
enum BotCommand {
    #[command(description = "Start the bot and show the menu")]
    Start,
    #[command(description = "Cancel the current flow")]
    Cancel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file appender on shutdown
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting DiceBuddy Telegram bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;
    run_migrations(&pool).await?;
    let db = DatabaseService::new(pool);

    // Initialize bot and services
    let bot = Bot::new(&settings.bot.token);
    let sender: Arc<dyn MessageSender> = Arc::new(TelegramSender::new(bot.clone()));
    let notifier =
        NotificationService::new(db.clone(), sender.clone(), settings.bot.admin_ids.clone());

    let ctx = Arc::new(AppContext {
        db: db.clone(),
        notifier,
        sessions: SessionStore::new(),
        settings: settings.clone(),
    });

    // Background reminder scheduler
    let scheduler = Arc::new(ReminderScheduler::new(
        db,
        sender,
        settings.scheduler.clone(),
    ));
    let _reminder_task = scheduler.spawn();
    info!(
        interval_secs = settings.scheduler.interval_secs,
        "Reminder scheduler started"
    );

    info!("Setting up bot handlers...");
    let handler = create_handler();

    info!("DiceBuddy bot is ready, starting polling...");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("DiceBuddy bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> teloxide::dispatching::UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>>
{
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<BotCommand>()
                        .endpoint(handle_command_update),
                )
                .branch(dptree::endpoint(handle_message_update)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback_update))
}

async fn handle_command_update(
    bot: Bot,
    msg: Message,
    cmd: BotCommand,
    ctx: Arc<AppContext>,
) -> HandlerResult {
    let ctx = (*ctx).clone();

    let result = match cmd {
        BotCommand::Start => handle_start(bot, msg, ctx).await,
        BotCommand::Cancel => handle_cancel(bot, msg, ctx).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

async fn handle_message_update(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> HandlerResult {
    let ctx = (*ctx).clone();

    if let Err(e) = handle_message(bot, msg, ctx).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

async fn handle_callback_update(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    ctx: Arc<AppContext>,
) -> HandlerResult {
    let ctx = (*ctx).clone();

    if let Err(e) = handle_callback_query(bot, query, ctx).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
