//! Channel protocol
//!
//! Defines the message envelope exchanged over the bidirectional messaging channel.

mod event_types;
mod messages;

pub use event_types::ChannelEventType;
pub use messages::ChannelMessage;
