//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ModBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_spam_config(&settings.moderation.spam)?;
    validate_report_config(&settings.moderation.reports)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(ModBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.owner_id <= 0 {
        return Err(ModBuddyError::Config(
            "Bot owner ID must be a positive Telegram user ID".to_string()
        ));
    }

    if let Some(ref api_url) = config.api_url {
        url::Url::parse(api_url).map_err(|e| {
            ModBuddyError::Config(format!("Invalid Bot API URL '{}': {}", api_url, e))
        })?;
    }

    Ok(())
}

/// Validate spam protection configuration
fn validate_spam_config(config: &super::SpamConfig) -> Result<()> {
    if config.max_messages_per_window == 0 {
        return Err(ModBuddyError::Config(
            "Max messages per window must be greater than 0".to_string()
        ));
    }

    if config.window_seconds == 0 {
        return Err(ModBuddyError::Config(
            "Rate limit window must be greater than 0 seconds".to_string()
        ));
    }

    if config.mute_duration_seconds == 0 {
        return Err(ModBuddyError::Config(
            "Spam mute duration must be greater than 0 seconds".to_string()
        ));
    }

    config.window()?;
    config.mute_duration()?;

    if config.forbidden_keywords.iter().any(|keyword| keyword.trim().is_empty()) {
        return Err(ModBuddyError::Config(
            "Forbidden keywords cannot be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate report escalation configuration
fn validate_report_config(config: &super::ReportConfig) -> Result<()> {
    if config.mute_threshold == 0 || config.kick_threshold == 0 {
        return Err(ModBuddyError::Config(
            "Report thresholds must be greater than 0".to_string()
        ));
    }

    config.auto_mute().map_err(|_| {
        ModBuddyError::Config(format!(
            "Invalid auto mute duration: {}. Use e.g. 30m, 2h or 1d",
            config.auto_mute_duration
        ))
    })?;

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ModBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ModBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
