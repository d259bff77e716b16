//! Target-user resolution for moderation commands

use tracing::debug;
use crate::models::{MessageContext, Participant};
use crate::services::gateway::ChatGateway;
use crate::utils::errors::{ModBuddyError, Result};
use crate::utils::helpers::fallback_user_label;

/// The user a command acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub user_id: i64,
    pub label: String,
}

impl ResolvedTarget {
    fn from_participant(participant: &Participant) -> Self {
        Self {
            user_id: participant.id,
            label: participant.display_name().to_string(),
        }
    }
}

/// Resolve the target of a command.
///
/// Tries the replied-to author, then a linked mention matching `argument`,
/// then `argument` as a numeric user id. `usage` is returned when there is
/// nothing to resolve at all.
pub async fn resolve_target(
    gateway: &dyn ChatGateway,
    context: &MessageContext,
    argument: Option<&str>,
    usage: &str,
) -> Result<ResolvedTarget> {
    if let Some(author) = &context.reply_to {
        return Ok(ResolvedTarget::from_participant(author));
    }

    let argument = argument.ok_or_else(|| ModBuddyError::InvalidInput(usage.to_string()))?;

    if let Some(mention) = context.mentions.iter().find(|m| m.matches(argument)) {
        return Ok(ResolvedTarget::from_participant(&mention.user));
    }

    if let Ok(user_id) = argument.parse::<i64>() {
        let label = match gateway.lookup_member(context.chat_id, user_id).await {
            Ok(name) => name,
            Err(e) => {
                debug!(chat_id = context.chat_id, user_id = user_id, error = %e, "Member lookup failed");
                fallback_user_label(user_id)
            }
        };
        return Ok(ResolvedTarget { user_id, label });
    }

    Err(ModBuddyError::InvalidInput(format!(
        "Could not find user {}. Please reply to the user's message, use a linked @mention, or provide their User ID.",
        argument
    )))
}
