//! Notification service implementation
//!
//! Fire-and-forget wrappers around the chat gateway. Every failure is logged
//! and swallowed so a broken outbound call never aborts the command or
//! message being handled.

use std::sync::Arc;
use futures::future::join_all;
use tracing::{debug, warn};
use crate::services::gateway::ChatGateway;
use crate::utils::helpers::{split_message, MAX_MESSAGE_LENGTH};
use crate::utils::logging::log_gateway_error;

/// Outbound messaging for the moderation core
#[derive(Clone)]
pub struct NotificationService {
    gateway: Arc<dyn ChatGateway>,
}

impl NotificationService {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<dyn ChatGateway> {
        &self.gateway
    }

    /// Send a message to a chat; returns whether it was delivered
    pub async fn send(&self, chat_id: i64, text: &str) -> bool {
        match self.gateway.send_message(chat_id, text).await {
            Ok(()) => true,
            Err(e) => {
                log_gateway_error("send_message", chat_id, &e);
                false
            }
        }
    }

    /// Send a possibly long text as consecutive messages of bounded length
    pub async fn send_chunked(&self, chat_id: i64, text: &str) {
        for chunk in split_message(text, MAX_MESSAGE_LENGTH) {
            if !self.send(chat_id, &chunk).await {
                break;
            }
        }
    }

    /// Delete a message; returns whether it was removed
    pub async fn delete(&self, chat_id: i64, message_id: i32) -> bool {
        match self.gateway.delete_message(chat_id, message_id).await {
            Ok(()) => true,
            Err(e) => {
                log_gateway_error("delete_message", chat_id, &e);
                false
            }
        }
    }

    /// Direct-message every user concurrently; returns how many were reached
    pub async fn notify_users(&self, user_ids: &[i64], text: &str) -> usize {
        let sends = user_ids.iter().map(|&user_id| async move {
            match self.gateway.send_direct_message(user_id, text).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(user_id = user_id, error = %e, "Failed to send direct notification");
                    false
                }
            }
        });

        let delivered = join_all(sends).await.into_iter().filter(|sent| *sent).count();
        debug!(recipients = user_ids.len(), delivered = delivered, "Direct notifications sent");
        delivered
    }
}
