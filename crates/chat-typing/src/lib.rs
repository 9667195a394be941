//! # chat-typing
//!
//! Typing presence for chat sessions: announces the local user's typing state
//! with debounced stop detection, and tracks which remote users are typing in
//! the active chat with per-user expiry.

pub mod channel;
pub mod client;
pub mod label;
pub mod protocol;
pub mod session;
pub mod tracker;

pub use channel::{ChannelError, MpscChannel, TypingChannel};
pub use client::{Bridge, BridgeError, BridgeHandle};
pub use label::{compose_typing_label, DisplayNames};
pub use protocol::{ChannelEventType, ChannelMessage};
pub use session::ChatSession;
pub use tracker::{
    Announcement, Ingest, TypingCallback, TypingTracker, TypingTrackerBuilder,
    DEFAULT_TYPING_TIMEOUT,
};
