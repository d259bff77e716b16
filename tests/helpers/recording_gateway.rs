//! In-memory chat gateway that records every outbound call

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use ModBuddy::{ChatGateway, ModBuddyError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Delete { chat_id: i64, message_id: i32 },
    Send { chat_id: i64, text: String },
    Direct { user_id: i64, text: String },
    Kick { chat_id: i64, user_id: i64 },
    Lookup { chat_id: i64, user_id: i64 },
}

/// Fake gateway with switchable failures
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    members: Mutex<HashMap<i64, String>>,
    unreachable: Mutex<HashSet<i64>>,
    fail_kicks: AtomicBool,
    fail_deletes: AtomicBool,
    fail_sends: AtomicBool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name returned by `lookup_member` for a user
    pub fn add_member(&self, user_id: i64, name: &str) {
        self.members.lock().unwrap().insert(user_id, name.to_string());
    }

    /// Direct messages to this user will fail
    pub fn make_unreachable(&self, user_id: i64) {
        self.unreachable.lock().unwrap().insert(user_id);
    }

    pub fn fail_kicks(&self, fail: bool) {
        self.fail_kicks.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Texts sent to a chat, oldest first
    pub fn sent(&self, chat_id: i64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Send { chat_id: chat, text } if chat == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_sent(&self, chat_id: i64) -> Option<String> {
        self.sent(chat_id).pop()
    }

    pub fn direct_messages(&self) -> Vec<(i64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Direct { user_id, text } => Some((user_id, text)),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self, chat_id: i64) -> Vec<i32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Delete { chat_id: chat, message_id } if chat == chat_id => Some(message_id),
                _ => None,
            })
            .collect()
    }

    pub fn kicked(&self, chat_id: i64) -> Vec<i64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Kick { chat_id: chat, user_id } if chat == chat_id => Some(user_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatGateway for RecordingGateway {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.record(GatewayCall::Delete { chat_id, message_id });
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ModBuddyError::Gateway("message to delete not found".to_string()));
        }
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.record(GatewayCall::Send { chat_id, text: text.to_string() });
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ModBuddyError::Gateway("chat not found".to_string()));
        }
        Ok(())
    }

    async fn send_direct_message(&self, user_id: i64, text: &str) -> Result<()> {
        self.record(GatewayCall::Direct { user_id, text: text.to_string() });
        if self.unreachable.lock().unwrap().contains(&user_id) {
            return Err(ModBuddyError::Gateway("bot can't initiate conversation with a user".to_string()));
        }
        Ok(())
    }

    async fn kick_member(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.record(GatewayCall::Kick { chat_id, user_id });
        if self.fail_kicks.load(Ordering::SeqCst) {
            return Err(ModBuddyError::Gateway("not enough rights to restrict/unrestrict chat member".to_string()));
        }
        Ok(())
    }

    async fn lookup_member(&self, chat_id: i64, user_id: i64) -> Result<String> {
        self.record(GatewayCall::Lookup { chat_id, user_id });
        self.members
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or_else(|| ModBuddyError::Gateway("user not found".to_string()))
    }
}
