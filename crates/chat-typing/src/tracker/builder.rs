//! Tracker builder

use super::typing_tracker::{TypingCallback, TypingTracker};
use super::DEFAULT_TYPING_TIMEOUT;
use crate::channel::TypingChannel;
use chat_core::{ChatId, UserId};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`TypingTracker`]
///
/// Every part is optional. Without a chat id remote events are always
/// discarded; without a chat id, user id or channel announcements are skipped.
#[derive(Default)]
pub struct TypingTrackerBuilder {
    chat_id: Option<ChatId>,
    user_id: Option<UserId>,
    channel: Option<Arc<dyn TypingChannel>>,
    on_change: Option<TypingCallback>,
    timeout: Option<Duration>,
}

impl TypingTrackerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active chat
    pub fn chat_id(mut self, chat_id: ChatId) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    /// Set the local user
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Set the outbound channel
    pub fn channel<C>(mut self, channel: C) -> Self
    where
        C: TypingChannel + 'static,
    {
        self.channel = Some(Arc::new(channel));
        self
    }

    /// Set the callback invoked when a remote user's typing state changes
    pub fn on_change(mut self, callback: TypingCallback) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// Set the debounce / expiry interval
    pub fn typing_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the tracker
    pub fn build(self) -> TypingTracker {
        TypingTracker::from_parts(
            self.chat_id,
            self.user_id,
            self.channel,
            self.on_change,
            self.timeout.unwrap_or(DEFAULT_TYPING_TIMEOUT),
        )
    }
}

impl std::fmt::Debug for TypingTrackerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingTrackerBuilder")
            .field("chat_id", &self.chat_id)
            .field("user_id", &self.user_id)
            .field("channel", &self.channel.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}
