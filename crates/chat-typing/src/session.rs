//! Chat session
//!
//! Owns the typing tracker for one open chat. Created when the chat opens and
//! closed when it closes; closing disposes the tracker and stops the inbound pump.

use crate::channel::{ChannelError, TypingChannel};
use crate::label::DisplayNames;
use crate::protocol::{ChannelEventType, ChannelMessage};
use crate::tracker::{Announcement, TypingCallback, TypingTracker};
use chat_common::TypingConfig;
use chat_core::{ChatId, UserId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A single open chat and its typing presence
pub struct ChatSession {
    session_id: String,
    chat_id: ChatId,
    user_id: UserId,
    tracker: TypingTracker,
    pump: Option<JoinHandle<()>>,
}

impl ChatSession {
    /// Open a chat session
    ///
    /// Spawns a task feeding `typing` messages from `inbound` into the tracker.
    /// Must be called from within a Tokio runtime.
    pub fn open<C>(
        config: &TypingConfig,
        chat_id: ChatId,
        user_id: UserId,
        channel: C,
        inbound: mpsc::Receiver<ChannelMessage>,
        on_change: Option<TypingCallback>,
    ) -> Self
    where
        C: TypingChannel + 'static,
    {
        let session_id = uuid::Uuid::new_v4().to_string();

        let mut builder = TypingTracker::builder()
            .chat_id(chat_id.clone())
            .user_id(user_id.clone())
            .channel(channel)
            .typing_timeout(config.timeout());
        if let Some(callback) = on_change {
            builder = builder.on_change(callback);
        }
        let tracker = builder.build();

        let pump = tokio::spawn(pump_inbound(
            session_id.clone(),
            user_id.clone(),
            tracker.share(),
            inbound,
        ));

        tracing::info!(
            session_id = %session_id,
            chat_id = %chat_id,
            user_id = %user_id,
            "Opened chat session"
        );

        Self {
            session_id,
            chat_id,
            user_id,
            tracker,
            pump: Some(pump),
        }
    }

    /// Session ID (for log correlation)
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Chat this session is scoped to
    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    /// Local user
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Typing tracker of this session
    pub fn tracker(&self) -> &TypingTracker {
        &self.tracker
    }

    /// Record a keystroke in the message box
    pub fn on_keystroke(&self) -> Result<Announcement, ChannelError> {
        self.tracker.announce_typing(true)
    }

    /// Announce that the local user stopped typing (message sent or box cleared)
    pub fn stop_typing(&self) -> Result<Announcement, ChannelError> {
        self.tracker.announce_typing(false)
    }

    /// Label for the typing indicator
    pub fn typing_label<N>(&self, names: &N) -> String
    where
        N: DisplayNames + ?Sized,
    {
        self.tracker.compose_typing_label(names)
    }

    /// Check if the session has been closed
    pub fn is_closed(&self) -> bool {
        self.pump.is_none()
    }

    /// Close the session
    ///
    /// Stops the inbound pump and disposes the tracker. Calling it again is a no-op.
    pub fn close(&mut self) {
        let Some(pump) = self.pump.take() else {
            return;
        };
        pump.abort();
        self.tracker.dispose();

        tracing::info!(
            session_id = %self.session_id,
            chat_id = %self.chat_id,
            "Closed chat session"
        );
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("session_id", &self.session_id)
            .field("chat_id", &self.chat_id)
            .field("user_id", &self.user_id)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Feed inbound channel messages into the tracker until the channel closes
async fn pump_inbound(
    session_id: String,
    local_user: UserId,
    tracker: TypingTracker,
    mut inbound: mpsc::Receiver<ChannelMessage>,
) {
    while let Some(message) = inbound.recv().await {
        match message.event_type() {
            Some(ChannelEventType::Typing) => {
                let event = match message.decode_typing() {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(
                            session_id = %session_id,
                            code = e.code(),
                            error = %e,
                            "Malformed typing event"
                        );
                        continue;
                    }
                };
                // Relays may echo our own announcements back
                if event.user_id == local_user {
                    continue;
                }
                tracker.ingest_remote_event(&event);
            }
            None => {
                tracing::debug!(
                    session_id = %session_id,
                    event = %message.event,
                    "Ignoring unknown channel event"
                );
            }
        }
    }

    tracing::debug!(session_id = %session_id, "Inbound channel closed");
}
