//! Typing presence tracking
//!
//! Outbound: local keystrokes become `typing` announcements, with a debounce
//! timer that announces the stop once the user goes quiet.
//!
//! Inbound: remote `typing` events for the active chat maintain an expiring
//! set of typing users.

mod builder;
mod timer;
mod typing_tracker;

pub use builder::TypingTrackerBuilder;
pub use typing_tracker::{Announcement, Ingest, TypingCallback, TypingTracker};

use std::time::Duration;

/// Debounce and expiry interval used when none is configured
pub const DEFAULT_TYPING_TIMEOUT: Duration = Duration::from_millis(3000);
