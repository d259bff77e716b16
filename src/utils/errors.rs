//! Error handling for ModBuddy
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy. Permission, input and
//! not-found errors carry the text shown to the chat user.

use thiserror::Error;

/// Main error type for ModBuddy application
#[derive(Error, Debug)]
pub enum ModBuddyError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for ModBuddy operations
pub type Result<T> = std::result::Result<T, ModBuddyError>;

impl ModBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ModBuddyError::Telegram(_) => true,
            ModBuddyError::Gateway(_) => true,
            ModBuddyError::Config(_) => false,
            ModBuddyError::ConfigLoad(_) => false,
            ModBuddyError::PermissionDenied(_) => true,
            ModBuddyError::InvalidInput(_) => true,
            ModBuddyError::NotFound(_) => true,
            ModBuddyError::Io(_) => true,
            ModBuddyError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ModBuddyError::Config(_) => ErrorSeverity::Critical,
            ModBuddyError::ConfigLoad(_) => ErrorSeverity::Critical,
            ModBuddyError::UrlParse(_) => ErrorSeverity::Critical,
            ModBuddyError::PermissionDenied(_) => ErrorSeverity::Info,
            ModBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            ModBuddyError::NotFound(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Text to show the chat user, if this error is meant to be seen by them
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ModBuddyError::PermissionDenied(text)
            | ModBuddyError::InvalidInput(text)
            | ModBuddyError::NotFound(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
