//! Chat gateway
//!
//! The outbound side of the bot. The moderation core only talks to the
//! messaging platform through [`ChatGateway`]; [`TelegramGateway`] is the
//! Bot API implementation.

use async_trait::async_trait;
use teloxide::{
    Bot,
    payloads::UnbanChatMemberSetters,
    prelude::*,
    types::{ChatId, MessageId, UserId},
};
use tracing::debug;
use crate::config::BotConfig;
use crate::utils::errors::{ModBuddyError, Result};

/// Outbound calls the moderation core needs from the platform
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Private message to a single user
    async fn send_direct_message(&self, user_id: i64, text: &str) -> Result<()>;

    /// Remove a member from the chat without banning them permanently
    async fn kick_member(&self, chat_id: i64, user_id: i64) -> Result<()>;

    /// Username or first name of a chat member
    async fn lookup_member(&self, chat_id: i64, user_id: i64) -> Result<String>;
}

/// Telegram Bot API gateway
#[derive(Clone, Debug)]
pub struct TelegramGateway {
    bot: Bot,
}

fn user_id(id: i64) -> Result<UserId> {
    u64::try_from(id)
        .map(UserId)
        .map_err(|_| ModBuddyError::InvalidInput(format!("Invalid user id: {}", id)))
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Build the bot client from configuration, honouring a custom API url
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let mut bot = Bot::new(&config.token);
        if let Some(api_url) = config.api_url.as_deref() {
            bot = bot.set_api_url(url::Url::parse(api_url)?);
        }
        Ok(Self::new(bot))
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl ChatGateway for TelegramGateway {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot.delete_message(ChatId(chat_id), MessageId(message_id)).await?;
        debug!(chat_id = chat_id, message_id = message_id, "Message deleted");
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }

    async fn send_direct_message(&self, user_id: i64, text: &str) -> Result<()> {
        // private chats share the user's id
        self.bot.send_message(ChatId(user_id), text).await?;
        Ok(())
    }

    async fn kick_member(&self, chat_id: i64, target_id: i64) -> Result<()> {
        let member = user_id(target_id)?;
        self.bot.ban_chat_member(ChatId(chat_id), member).await?;
        self.bot
            .unban_chat_member(ChatId(chat_id), member)
            .only_if_banned(true)
            .await?;
        debug!(chat_id = chat_id, user_id = target_id, "Member kicked");
        Ok(())
    }

    async fn lookup_member(&self, chat_id: i64, target_id: i64) -> Result<String> {
        let member = self.bot.get_chat_member(ChatId(chat_id), user_id(target_id)?).await?;
        Ok(member.user.username.unwrap_or(member.user.first_name))
    }
}
