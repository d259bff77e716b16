//! Conversion from Telegram messages to moderation events

use teloxide::types::{Message, MessageEntityKind, User};
use crate::models::{CommandEvent, CommandKind, Mention, MessageContext, Participant, TextMessage};

fn participant(user: &User) -> Participant {
    Participant::new(user.id.0 as i64, user.username.as_deref(), &user.first_name)
}

/// Linked mentions (`text_mention` entities) carried by the message
fn mentions(msg: &Message) -> Vec<Mention> {
    msg.parse_entities()
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entity| match entity.kind() {
            MessageEntityKind::TextMention { user } => Some(Mention {
                text: entity.text().to_string(),
                user: participant(user),
            }),
            _ => None,
        })
        .collect()
}

/// Build the event context; `None` for messages without a sender
pub fn message_context(msg: &Message) -> Option<MessageContext> {
    let sender = msg.from.as_ref()?;

    Some(MessageContext {
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        sender: participant(sender),
        reply_to: msg
            .reply_to_message()
            .and_then(|replied| replied.from.as_ref())
            .map(participant),
        mentions: mentions(msg),
    })
}

/// Whether the message starts with a `bot_command` entity
pub fn is_bot_command(msg: &Message) -> bool {
    msg.entities()
        .and_then(|entities| entities.first())
        .is_some_and(|entity| entity.offset == 0 && matches!(entity.kind, MessageEntityKind::BotCommand))
}

pub fn command_event(msg: &Message, command: CommandKind, args: &str) -> Option<CommandEvent> {
    message_context(msg).map(|context| CommandEvent::new(command, args, context))
}

pub fn text_message(msg: &Message) -> Option<TextMessage> {
    let text = msg.text()?;
    message_context(msg).map(|context| TextMessage {
        text: text.to_string(),
        context,
    })
}
