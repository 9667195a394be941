//! Test fixtures

use chat_common::TypingConfig;
use chat_core::UserId;
use std::collections::HashMap;
use std::time::Duration;

/// Typing interval used by every test
pub const TEST_TIMEOUT_MS: u64 = 3000;

/// Typing configuration for tests
pub fn test_config() -> TypingConfig {
    TypingConfig {
        timeout_ms: TEST_TIMEOUT_MS,
        channel_buffer: 32,
    }
}

/// Display names for the usual cast
pub fn display_names() -> HashMap<UserId, String> {
    [("alice", "Alice"), ("bob", "Bob"), ("carol", "Carol"), ("dave", "Dave")]
        .into_iter()
        .map(|(id, name)| (UserId::new(id), name.to_string()))
        .collect()
}

/// Let spawned tasks (timers, pumps, relay) run to quiescence
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Advance the paused clock and let everything due run
pub async fn advance_ms(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}
