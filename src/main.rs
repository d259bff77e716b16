//! ModBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn, error};

use ModBuddy::{
    config::Settings,
    utils::logging,
    services::{ChatGateway, ModerationService, TelegramGateway},
    state::SystemClock,
    handlers::{handle_command, handle_message, Command},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard flushes the log file on shutdown
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ModBuddy::info());

    // Initialize bot
    let gateway = TelegramGateway::from_config(&settings.bot)?;
    let bot = gateway.bot().clone();

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    // Initialize services
    let gateway: Arc<dyn ChatGateway> = Arc::new(gateway);
    let service = Arc::new(ModerationService::new(&settings, gateway, Arc::new(SystemClock))?);

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build();

    info!("ModBuddy bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("ModBuddy bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    Update::filter_message()
        .branch(
            // Handle commands
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_commands),
        )
        .branch(
            // Handle regular messages
            dptree::filter(|msg: Message| msg.text().is_some()).endpoint(handle_messages),
        )
}

/// Handle bot commands
async fn handle_commands(msg: Message, cmd: Command, service: Arc<ModerationService>) -> HandlerResult {
    if let Err(e) = handle_command(msg, cmd, service).await {
        error!(error = %e, severity = %e.severity(), "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(msg: Message, service: Arc<ModerationService>) -> HandlerResult {
    if let Err(e) = handle_message(msg, service).await {
        error!(error = %e, severity = %e.severity(), "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
