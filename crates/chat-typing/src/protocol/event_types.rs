//! Channel event types
//!
//! Event names carried in the `event` field of channel messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelEventType {
    /// A user started or stopped typing
    Typing,
}

impl ChannelEventType {
    /// Get the event name as sent on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Typing => "typing",
        }
    }

    /// Parse an event name
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "typing" => Some(Self::Typing),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
