//! Channel message format
//!
//! Every message on the channel is `{ "event": <name>, "data": <payload> }`.
//! Events this client does not know are kept intact so callers can ignore them.

use super::ChannelEventType;
use chat_core::{DomainError, DomainResult, TypingEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Channel message envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Event name
    pub event: String,

    /// Event data payload
    #[serde(default)]
    pub data: Value,
}

impl ChannelMessage {
    /// Create a `typing` message
    pub fn typing(event: &TypingEvent) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event: ChannelEventType::Typing.as_str().to_string(),
            data: serde_json::to_value(event)?,
        })
    }

    /// Get the event type, if known
    pub fn event_type(&self) -> Option<ChannelEventType> {
        ChannelEventType::from_str(&self.event)
    }

    /// Decode the payload of a `typing` message
    pub fn decode_typing(&self) -> DomainResult<TypingEvent> {
        if self.event_type() != Some(ChannelEventType::Typing) {
            return Err(DomainError::InvalidEvent(format!(
                "expected typing event, got {}",
                self.event
            )));
        }
        serde_json::from_value(self.data.clone())
            .map_err(|e| DomainError::InvalidEvent(e.to_string()))
    }

    /// Try to parse as a typing event
    ///
    /// Returns `None` for other events and for malformed typing payloads.
    pub fn as_typing(&self) -> Option<TypingEvent> {
        self.decode_typing().ok()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
