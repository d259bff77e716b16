//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Message handlers for plain text messages
//! - The adapter turning Telegram messages into moderation events

pub mod adapter;
pub mod commands;
pub mod messages;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use messages::handle_message;
