//! # chat-core
//!
//! Domain layer containing identifiers, typing presence events, and domain errors.
//! This crate has zero dependencies on infrastructure (runtime, transport, etc.).

pub mod error;
pub mod events;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use error::{DomainError, DomainResult};
pub use events::TypingEvent;
pub use value_objects::{ChatId, UserId};
