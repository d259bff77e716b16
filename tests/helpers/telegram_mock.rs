//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing the real gateway. It uses wiremock to create configurable mock
//! responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};
use ModBuddy::config::BotConfig;

use super::test_data::{test_bot_token, OWNER_ID};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

fn ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result }))
}

fn api_error(description: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "ok": false,
        "error_code": 400,
        "description": description,
    }))
}

/// Bot API method names are case-insensitive
fn method_path(name: &str) -> String {
    format!(r"(?i)^/bot[^/]+/{}$", name)
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Bot configuration pointing at this server
    pub fn bot_config(&self) -> BotConfig {
        BotConfig {
            token: test_bot_token(),
            owner_id: OWNER_ID,
            api_url: Some(format!("{}/", self.server.uri())),
        }
    }

    async fn mount(&self, name: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path_regex(method_path(name)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_send_message(&self, chat_id: i64) {
        self.mount(
            "sendMessage",
            ok(json!({
                "message_id": 123,
                "from": { "id": 12345, "is_bot": true, "first_name": "ModBuddy", "username": "modbuddy_bot" },
                "chat": { "id": chat_id, "title": "Test Group", "type": "group" },
                "date": 1640995200,
                "text": "Test message"
            })),
        )
        .await;
    }

    pub async fn mock_delete_message(&self) {
        self.mount("deleteMessage", ok(json!(true))).await;
    }

    pub async fn mock_kick(&self) {
        self.mount("banChatMember", ok(json!(true))).await;
        self.mount("unbanChatMember", ok(json!(true))).await;
    }

    pub async fn mock_kick_forbidden(&self) {
        self.mount("banChatMember", api_error("Bad Request: not enough rights to restrict/unrestrict chat member"))
            .await;
    }

    pub async fn mock_get_chat_member(&self, user_id: i64, first_name: &str, username: Option<&str>) {
        let mut user = json!({ "id": user_id, "is_bot": false, "first_name": first_name });
        if let Some(username) = username {
            user["username"] = json!(username);
        }
        self.mount("getChatMember", ok(json!({ "status": "member", "user": user }))).await;
    }

    pub async fn mock_get_chat_member_missing(&self) {
        self.mount("getChatMember", api_error("Bad Request: user not found")).await;
    }

    /// Names of the Bot API methods called so far, lowercased
    pub async fn called_methods(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter_map(|request| request.url.path().rsplit('/').next().map(str::to_lowercase))
            .collect()
    }
}
