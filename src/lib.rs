//! ModBuddy Telegram Bot
//!
//! A Telegram bot for group chat moderation. This library provides the
//! moderation core (roles, mutes, spam protection, user reports with
//! automatic escalation) and the Telegram handlers that feed it.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ModBuddyError, Result};

// Re-export main components for easy access
pub use services::{ChatGateway, EventHandler, ModerationService, TelegramGateway};
pub use state::{Clock, ModerationStore, SystemClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
