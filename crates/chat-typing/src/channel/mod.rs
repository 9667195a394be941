//! Outbound messaging channel
//!
//! The tracker only needs to hand typing events to the channel. Connection
//! lifecycle, reconnection and authentication belong to the channel owner.

mod error;
mod mpsc;

pub use error::ChannelError;
pub use mpsc::MpscChannel;

use chat_core::TypingEvent;
use std::sync::Arc;

/// Sink for outbound typing presence events
///
/// `send` is fire-and-forget: it returns once the event is enqueued and never
/// waits for delivery confirmation. Failures are reported to the caller as-is;
/// implementations must not retry.
pub trait TypingChannel: Send + Sync {
    /// Enqueue a typing event for delivery
    fn send(&self, event: &TypingEvent) -> Result<(), ChannelError>;
}

impl<C> TypingChannel for Arc<C>
where
    C: TypingChannel + ?Sized,
{
    fn send(&self, event: &TypingEvent) -> Result<(), ChannelError> {
        (**self).send(event)
    }
}
