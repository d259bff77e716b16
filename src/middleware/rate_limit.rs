//! Rate limiting middleware
//!
//! This module tracks recent message timestamps per chat member and decides
//! when a member is sending too many messages in a trailing time window.

use std::collections::VecDeque;
use chrono::{DateTime, Duration, Utc};
use crate::config::SpamConfig;
use crate::utils::errors::{ModBuddyError, Result};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum messages allowed inside the window
    pub max_messages: usize,
    /// Trailing window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_messages: 5,
            window: Duration::seconds(10),
        }
    }
}

impl TryFrom<&SpamConfig> for RateLimitConfig {
    type Error = ModBuddyError;

    fn try_from(config: &SpamConfig) -> Result<Self> {
        Ok(Self {
            max_messages: config.max_messages_per_window,
            window: config.window()?,
        })
    }
}

/// Outcome of recording one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitVerdict {
    Allowed { count: usize },
    Exceeded { count: usize },
}

impl RateLimitVerdict {
    pub fn is_exceeded(&self) -> bool {
        matches!(self, RateLimitVerdict::Exceeded { .. })
    }
}

/// Recent message timestamps of one member, oldest first
#[derive(Debug, Clone, Default)]
pub struct RateWindow {
    timestamps: VecDeque<DateTime<Utc>>,
}

impl RateWindow {
    /// Drop timestamps that fell out of the trailing window
    fn cleanup(&mut self, now: DateTime<Utc>, window: Duration) {
        while let Some(oldest) = self.timestamps.front() {
            if now - *oldest < window {
                break;
            }
            self.timestamps.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

impl RateLimitConfig {
    /// Drop expired timestamps without recording a message
    pub fn prune<'a>(&self, window: &'a mut RateWindow, now: DateTime<Utc>) -> &'a RateWindow {
        window.cleanup(now, self.window);
        window
    }

    /// Record a message at `now` and check the window against the cap
    pub fn record(&self, window: &mut RateWindow, now: DateTime<Utc>) -> RateLimitVerdict {
        window.timestamps.push_back(now);
        window.cleanup(now, self.window);

        let count = window.len();
        if count > self.max_messages {
            RateLimitVerdict::Exceeded { count }
        } else {
            RateLimitVerdict::Allowed { count }
        }
    }
}
