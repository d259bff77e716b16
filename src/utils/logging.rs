//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ModBuddy application.

use tracing::{info, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::{LogFormat, LoggingConfig};
use crate::utils::errors::{ModBuddyError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file appender; keep it alive for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ModBuddyError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let stdout_layer = match config.format {
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stdout).boxed(),
        LogFormat::Plain => fmt::layer().with_writer(std::io::stdout).boxed(),
    };

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "modbuddy.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ModBuddyError::Config(format!("Failed to install log subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log moderation actions with structured data
pub fn log_moderation_action(
    chat_id: i64,
    actor_id: i64,
    action: &str,
    target_id: Option<i64>,
    details: Option<&str>,
) {
    info!(
        chat_id = chat_id,
        actor_id = actor_id,
        action = action,
        target_id = target_id,
        details = details,
        "Moderation action performed"
    );
}

/// Log actions the bot takes on its own (spam mutes, report escalation)
pub fn log_auto_action(chat_id: i64, target_id: i64, action: &str, details: Option<&str>) {
    info!(
        chat_id = chat_id,
        target_id = target_id,
        action = action,
        details = details,
        "Automatic moderation action"
    );
}

/// Log failed outbound platform calls
pub fn log_gateway_error(operation: &str, chat_id: i64, error: &ModBuddyError) {
    error!(
        operation = operation,
        chat_id = chat_id,
        error = %error,
        "Gateway call failed"
    );
}

/// Log rejected commands; these are expected and never escalate
pub fn log_rejected_command(chat_id: i64, user_id: i64, command: &str, error: &ModBuddyError) {
    debug!(
        chat_id = chat_id,
        user_id = user_id,
        command = command,
        severity = %error.severity(),
        reason = %error,
        "Command rejected"
    );
}
