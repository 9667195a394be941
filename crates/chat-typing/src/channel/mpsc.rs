//! Channel backed by a Tokio mpsc queue
//!
//! The receiving half is drained by whatever carries messages to the wire
//! (the WebSocket bridge, or a relay in tests).

use super::{ChannelError, TypingChannel};
use crate::protocol::ChannelMessage;
use chat_core::TypingEvent;
use tokio::sync::mpsc;

/// Outbound channel writing `ChannelMessage`s into an mpsc queue
#[derive(Debug, Clone)]
pub struct MpscChannel {
    sender: mpsc::Sender<ChannelMessage>,
}

impl MpscChannel {
    /// Wrap an existing sender
    pub fn new(sender: mpsc::Sender<ChannelMessage>) -> Self {
        Self { sender }
    }

    /// Create a channel together with its receiving half
    pub fn pair(buffer: usize) -> (Self, mpsc::Receiver<ChannelMessage>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }

    /// Check if the receiving half has been dropped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl TypingChannel for MpscChannel {
    fn send(&self, event: &TypingEvent) -> Result<(), ChannelError> {
        let message = ChannelMessage::typing(event)?;
        self.sender.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => ChannelError::Full,
            mpsc::error::TrySendError::Closed(_) => ChannelError::Closed,
        })
    }
}
