//! Test data fixtures

use ModBuddy::config::{BotConfig, LoggingConfig, ModerationConfig, Settings};
use ModBuddy::models::{Mention, Participant};

pub const OWNER_ID: i64 = 123456789;
pub const CHAT_ID: i64 = -1001234567890;
pub const OTHER_CHAT_ID: i64 = -1009876543210;

/// Test bot token accepted by the mock Bot API
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

pub fn test_settings() -> Settings {
    Settings {
        bot: BotConfig {
            token: test_bot_token(),
            owner_id: OWNER_ID,
            api_url: None,
        },
        moderation: ModerationConfig::default(),
        logging: LoggingConfig::default(),
    }
}

pub fn owner() -> Participant {
    Participant::new(OWNER_ID, Some("owner"), "Olivia")
}

pub fn alice() -> Participant {
    Participant::new(2, Some("alice"), "Alice")
}

pub fn bob() -> Participant {
    Participant::new(3, Some("bob"), "Bob")
}

pub fn carol() -> Participant {
    Participant::new(4, None, "Carol")
}

pub fn eve() -> Participant {
    Participant::new(5, Some("eve"), "Eve")
}

/// Distinct regular members, e.g. to file several reports
pub fn member(id: i64) -> Participant {
    Participant::new(id, Some(&format!("member{}", id)), "Member")
}

pub fn mention_of(participant: &Participant, text: &str) -> Mention {
    Mention {
        text: text.to_string(),
        user: participant.clone(),
    }
}
