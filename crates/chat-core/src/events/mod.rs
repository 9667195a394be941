//! Presence events exchanged between chat participants

mod typing_event;

pub use typing_event::TypingEvent;
