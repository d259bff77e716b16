//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};

/// Longest text sent in a single chat message
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Label used for a user whose display name could not be looked up
pub fn fallback_user_label(user_id: i64) -> String {
    format!("User (ID: {})", user_id)
}

/// Strip a single leading `@` from a username argument
pub fn strip_mention_prefix(text: &str) -> &str {
    text.strip_prefix('@').unwrap_or(text)
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Chunks never split a UTF-8 character.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for c in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Human readable minutes for a number of seconds, rounding down
pub fn whole_minutes(seconds: u64) -> u64 {
    seconds / 60
}
