//! Typing presence event
//!
//! Announces that a user started or stopped typing in a specific chat.
//! The same shape is used outbound and inbound.

use crate::value_objects::{ChatId, UserId};
use serde::{Deserialize, Serialize};

/// Typing presence event payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingEvent {
    /// Chat the event is scoped to
    pub chat_id: ChatId,
    /// User whose typing state changed
    pub user_id: UserId,
    /// Whether the user is typing
    pub is_typing: bool,
}

impl TypingEvent {
    /// Create a new typing event
    #[must_use]
    pub fn new(chat_id: ChatId, user_id: UserId, is_typing: bool) -> Self {
        Self {
            chat_id,
            user_id,
            is_typing,
        }
    }

    /// Create a "started typing" event
    #[must_use]
    pub fn started(chat_id: ChatId, user_id: UserId) -> Self {
        Self::new(chat_id, user_id, true)
    }

    /// Create a "stopped typing" event
    #[must_use]
    pub fn stopped(chat_id: ChatId, user_id: UserId) -> Self {
        Self::new(chat_id, user_id, false)
    }

    /// Check whether this event is scoped to the given chat
    #[must_use]
    pub fn belongs_to(&self, chat_id: &ChatId) -> bool {
        &self.chat_id == chat_id
    }
}
