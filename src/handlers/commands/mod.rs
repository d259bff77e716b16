//! Command handlers module
//!
//! This module maps Telegram bot commands onto the moderation core.

use std::sync::Arc;
use teloxide::{types::Message, utils::command::BotCommands};
use tracing::debug;
use crate::handlers::adapter::command_event;
use crate::models::CommandKind;
use crate::services::ModerationService;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "ModBuddy commands:")]
pub enum Command {
    #[command(description = "Show your role in this chat")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Make a user an admin")]
    SetAdmin(String),
    #[command(description = "Make a user a moderator")]
    SetModerator(String),
    #[command(description = "Reset a user to a regular member")]
    RemovePermission(String),
    #[command(description = "Mute a user, e.g. /mute @user 30m")]
    Mute(String),
    #[command(description = "Lift a user's mute")]
    Unmute(String),
    #[command(description = "Remove a user from the chat")]
    Kick(String),
    #[command(description = "Turn spam protection on or off (admin only)")]
    ToggleSpam,
    #[command(description = "Report a user to the admins")]
    Report(String),
    #[command(description = "List pending reports (admin only)")]
    ListReports(String),
    #[command(description = "Clear a user's reports (admin only)")]
    ClearReports(String),
    #[command(description = "Turn automatic report actions on or off (admin only)")]
    ToggleAutoActions,
}

impl Command {
    /// Core command kind and raw argument text
    pub fn split(&self) -> (CommandKind, &str) {
        match self {
            Command::Start => (CommandKind::Start, ""),
            Command::Help => (CommandKind::Help, ""),
            Command::SetAdmin(args) => (CommandKind::SetAdmin, args),
            Command::SetModerator(args) => (CommandKind::SetModerator, args),
            Command::RemovePermission(args) => (CommandKind::RemovePermission, args),
            Command::Mute(args) => (CommandKind::Mute, args),
            Command::Unmute(args) => (CommandKind::Unmute, args),
            Command::Kick(args) => (CommandKind::Kick, args),
            Command::ToggleSpam => (CommandKind::ToggleSpam, ""),
            Command::Report(args) => (CommandKind::Report, args),
            Command::ListReports(args) => (CommandKind::ListReports, args),
            Command::ClearReports(args) => (CommandKind::ClearReports, args),
            Command::ToggleAutoActions => (CommandKind::ToggleAutoActions, ""),
        }
    }
}

/// Main command dispatcher
pub async fn handle_command(msg: Message, cmd: Command, service: Arc<ModerationService>) -> Result<()> {
    let (kind, args) = cmd.split();

    match command_event(&msg, kind, args) {
        Some(event) => service.handle_command(event).await,
        None => {
            debug!(chat_id = msg.chat.id.0, command = kind.name(), "Ignoring command without sender");
            Ok(())
        }
    }
}
