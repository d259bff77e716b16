//! Message handlers module
//!
//! Handles incoming text messages: spam guard and mute enforcement

use std::sync::Arc;
use teloxide::types::Message;
use tracing::debug;
use crate::handlers::adapter::{is_bot_command, text_message};
use crate::services::ModerationService;
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_message(msg: Message, service: Arc<ModerationService>) -> Result<()> {
    let Some(message) = text_message(&msg) else {
        return Ok(());
    };

    // commands the bot does not know about; plain text starting with '/' is still moderated
    if is_bot_command(&msg) {
        debug!(
            chat_id = message.context.chat_id,
            user_id = message.context.sender.id,
            text = %message.text,
            "Ignoring unknown command"
        );
        return Ok(());
    }

    service.handle_text(message).await
}
