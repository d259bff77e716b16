//! Telegram message handler: which texts reach the spam guard and mute check

mod helpers;

use std::sync::Arc;
use chrono::Duration;
use serde_json::json;
use teloxide::types::Message;
use helpers::*;
use ModBuddy::handlers::handle_message;
use ModBuddy::models::{CommandEvent, CommandKind, MessageContext};
use ModBuddy::services::ModerationService;
use ModBuddy::state::ManualClock;

struct Harness {
    service: Arc<ModerationService>,
    gateway: Arc<RecordingGateway>,
}

impl Harness {
    fn new() -> Self {
        let gateway = Arc::new(RecordingGateway::new());
        let clock = ManualClock::new(start_time());
        let service = ModerationService::new(&test_settings(), gateway.clone(), Arc::new(clock))
            .expect("test settings are valid");
        Self {
            service: Arc::new(service),
            gateway,
        }
    }

    async fn mute_eve(&self, duration: &str) {
        let context = MessageContext {
            chat_id: CHAT_ID,
            message_id: 1,
            sender: owner(),
            reply_to: None,
            mentions: Vec::new(),
        };
        let event = CommandEvent::new(CommandKind::Mute, &format!("5 {}", duration), context);
        self.service.handle_command(event).await.unwrap();
        self.gateway.clear();
    }

    async fn send(&self, msg: Message) {
        handle_message(msg, self.service.clone()).await.unwrap();
    }
}

fn from_eve(message_id: i32, text: &str) -> serde_json::Value {
    json!({
        "message_id": message_id,
        "date": 1717243200,
        "chat": { "id": CHAT_ID, "type": "supergroup", "title": "Test Chat" },
        "from": { "id": 5, "is_bot": false, "first_name": "Eve", "username": "eve" },
        "text": text,
    })
}

fn message(value: serde_json::Value) -> Message {
    serde_json::from_value(value).expect("valid message json")
}

fn command_from_eve(message_id: i32, text: &str, length: usize) -> Message {
    let mut value = from_eve(message_id, text);
    value["entities"] = json!([{ "type": "bot_command", "offset": 0, "length": length }]);
    message(value)
}

#[tokio::test]
async fn test_muted_user_cannot_hide_behind_leading_slash() {
    let harness = Harness::new();
    harness.mute_eve("1h").await;

    harness.send(message(from_eve(10, "normal text"))).await;
    harness.send(message(from_eve(11, "/ still talking while muted"))).await;
    harness.send(message(from_eve(12, "// spamlink.com"))).await;

    assert_eq!(harness.gateway.deleted(CHAT_ID), vec![10, 11, 12]);
}

#[tokio::test]
async fn test_slash_text_still_hits_keyword_filter() {
    let harness = Harness::new();

    harness.send(message(from_eve(20, "/// spamlink.com"))).await;

    assert_eq!(harness.gateway.deleted(CHAT_ID), vec![20]);
    assert_eq!(
        harness.gateway.sent(CHAT_ID),
        vec!["@eve, your message was removed due to forbidden content.".to_string()]
    );
}

#[tokio::test]
async fn test_unknown_bot_command_is_ignored() {
    let harness = Harness::new();
    harness.mute_eve("1h").await;

    harness.send(command_from_eve(30, "/ban spamlink.com", 4)).await;

    assert!(harness.gateway.deleted(CHAT_ID).is_empty());
    assert!(harness.gateway.sent(CHAT_ID).is_empty());
}

#[tokio::test]
async fn test_unknown_commands_do_not_count_toward_rate_limit() {
    let harness = Harness::new();

    for id in 40..45 {
        harness.send(message(from_eve(id, "hello"))).await;
    }
    harness.send(command_from_eve(45, "/foo", 4)).await;
    assert!(harness.service.mute_expiry(CHAT_ID, 5).is_none());

    harness.send(message(from_eve(46, "/hello again"))).await;
    assert_eq!(harness.gateway.deleted(CHAT_ID), vec![46]);
    assert_eq!(
        harness.service.mute_expiry(CHAT_ID, 5),
        Some(start_time() + Duration::seconds(300))
    );
}
