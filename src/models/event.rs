//! Inbound event model
//!
//! Transport-independent shapes of the commands and text messages the
//! moderation core reacts to. The Telegram handlers build these from
//! `teloxide` messages; other transports can build them directly.

use serde::{Deserialize, Serialize};

/// A chat participant as seen on an inbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
}

impl Participant {
    pub fn new(id: i64, username: Option<&str>, first_name: &str) -> Self {
        Self {
            id,
            username: username.map(str::to_string),
            first_name: first_name.to_string(),
        }
    }

    /// Username if present, otherwise first name
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.first_name)
    }

    /// Username if present, otherwise the numeric id
    pub fn handle(&self) -> String {
        self.username.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// A linked mention of a user inside message text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// The mention text exactly as it appears in the message
    pub text: String,
    pub user: Participant,
}

impl Mention {
    /// Whether a command argument refers to this mention
    pub fn matches(&self, argument: &str) -> bool {
        if self.text == argument {
            return true;
        }
        let wanted = crate::utils::helpers::strip_mention_prefix(argument);
        self.user.username.as_deref() == Some(wanted)
    }
}

/// Where a message came from and what it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContext {
    pub chat_id: i64,
    pub message_id: i32,
    pub sender: Participant,
    /// Author of the message this one replies to
    pub reply_to: Option<Participant>,
    pub mentions: Vec<Mention>,
}

/// Commands understood by the moderation core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Start,
    Help,
    SetAdmin,
    SetModerator,
    RemovePermission,
    Mute,
    Unmute,
    Kick,
    ToggleSpam,
    Report,
    ListReports,
    ClearReports,
    ToggleAutoActions,
}

impl CommandKind {
    pub const ALL: [CommandKind; 13] = [
        CommandKind::Start,
        CommandKind::Help,
        CommandKind::SetAdmin,
        CommandKind::SetModerator,
        CommandKind::RemovePermission,
        CommandKind::Mute,
        CommandKind::Unmute,
        CommandKind::Kick,
        CommandKind::ToggleSpam,
        CommandKind::Report,
        CommandKind::ListReports,
        CommandKind::ClearReports,
        CommandKind::ToggleAutoActions,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Help => "help",
            CommandKind::SetAdmin => "setadmin",
            CommandKind::SetModerator => "setmoderator",
            CommandKind::RemovePermission => "removepermission",
            CommandKind::Mute => "mute",
            CommandKind::Unmute => "unmute",
            CommandKind::Kick => "kick",
            CommandKind::ToggleSpam => "togglespam",
            CommandKind::Report => "report",
            CommandKind::ListReports => "listreports",
            CommandKind::ClearReports => "clearreports",
            CommandKind::ToggleAutoActions => "toggleautoactions",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Start => "Show your role in this chat",
            CommandKind::Help => "Show this help message",
            CommandKind::SetAdmin => "Make a user an admin",
            CommandKind::SetModerator => "Make a user a moderator",
            CommandKind::RemovePermission => "Reset a user to a regular member",
            CommandKind::Mute => "Mute a user for a duration (30m, 1h, 1d)",
            CommandKind::Unmute => "Lift a user's mute",
            CommandKind::Kick => "Remove a user from the chat",
            CommandKind::ToggleSpam => "Turn spam protection on or off",
            CommandKind::Report => "Report a user to the admins",
            CommandKind::ListReports => "List reported users or one user's reports",
            CommandKind::ClearReports => "Clear all reports against a user",
            CommandKind::ToggleAutoActions => "Turn automatic actions on reports on or off",
        }
    }
}

/// A command with its whitespace-separated arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEvent {
    pub command: CommandKind,
    pub args: Vec<String>,
    pub context: MessageContext,
}

impl CommandEvent {
    pub fn new(command: CommandKind, args: &str, context: MessageContext) -> Self {
        Self {
            command,
            args: args.split_whitespace().map(str::to_string).collect(),
            context,
        }
    }
}

/// A plain text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    pub text: String,
    pub context: MessageContext,
}

/// Anything the moderation core can be asked to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command(CommandEvent),
    Text(TextMessage),
}
