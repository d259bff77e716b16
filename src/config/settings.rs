//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use crate::models::MuteDuration;
use crate::utils::errors::{ModBuddyError, Result};

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "MODBUDDY";

/// Upper bound for the spam window and spam mute (one year)
pub const MAX_SPAM_SECONDS: u64 = 366 * 24 * 60 * 60;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    #[serde(default)]
    pub moderation: ModerationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// The single identity that is always treated as ADMIN
    pub owner_id: i64,
    /// Alternative Bot API server, e.g. a self-hosted one
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Moderation policy configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModerationConfig {
    pub spam: SpamConfig,
    pub reports: ReportConfig,
}

/// Spam protection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpamConfig {
    /// Initial state of spam protection in every chat
    pub enabled: bool,
    pub max_messages_per_window: usize,
    pub window_seconds: u64,
    pub mute_duration_seconds: u64,
    /// Matched case-insensitively as substrings
    pub forbidden_keywords: Vec<String>,
}

/// Report escalation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Initial state of automatic report actions in every chat
    pub auto_actions_enabled: bool,
    pub mute_threshold: usize,
    pub kick_threshold: usize,
    /// Duration such as "2h"
    pub auto_mute_duration: String,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub directory: Option<String>,
    pub format: LogFormat,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load settings from an explicit TOML file, still honouring the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    fn environment() -> config::Environment {
        // MODBUDDY_BOT__TOKEN -> bot.token
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("moderation.spam.forbidden_keywords")
    }
}

fn bounded_seconds(key: &str, seconds: u64) -> Result<Duration> {
    match i64::try_from(seconds) {
        Ok(value) if seconds <= MAX_SPAM_SECONDS => Ok(Duration::seconds(value)),
        _ => Err(ModBuddyError::Config(format!(
            "{} must be at most {} seconds, got {}",
            key, MAX_SPAM_SECONDS, seconds
        ))),
    }
}

impl SpamConfig {
    /// Length of the trailing rate-limit window
    pub fn window(&self) -> Result<Duration> {
        bounded_seconds("window_seconds", self.window_seconds)
    }

    /// How long a rate-limited sender stays muted
    pub fn mute_duration(&self) -> Result<Duration> {
        bounded_seconds("mute_duration_seconds", self.mute_duration_seconds)
    }
}

impl ReportConfig {
    /// Parsed form of `auto_mute_duration`
    pub fn auto_mute(&self) -> Result<MuteDuration> {
        self.auto_mute_duration.parse()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                owner_id: 0,
                api_url: None,
            },
            moderation: ModerationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_messages_per_window: 5,
            window_seconds: 10,
            mute_duration_seconds: 300,
            forbidden_keywords: vec![
                "keyword1".to_string(),
                "spamlink.com".to_string(),
                "another_bad_word".to_string(),
            ],
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            auto_actions_enabled: true,
            mute_threshold: 3,
            kick_threshold: 5,
            auto_mute_duration: "2h".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            format: LogFormat::Plain,
        }
    }
}
