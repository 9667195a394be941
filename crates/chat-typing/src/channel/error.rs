//! Channel error types

use thiserror::Error;

/// Errors returned when handing an event to the channel
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The receiving side of the channel is gone
    #[error("Channel closed")]
    Closed,

    /// The channel buffer is full
    #[error("Channel full")]
    Full,

    /// The event could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ChannelError {
    /// Check whether the channel can never accept events again
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
