//! Typing presence integration tests
//!
//! Sessions talk to each other through the loopback relay on a paused clock.
//!
//! Run with: cargo test -p integration-tests --test typing_tests

use chat_core::UserId;
use integration_tests::{advance_ms, display_names, settle, LoopbackRelay, TEST_TIMEOUT_MS};

fn user(id: &str) -> UserId {
    UserId::new(id)
}

// ============================================================================
// Outbound to inbound
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_peer_sees_typing_then_debounced_stop() {
    let mut relay = LoopbackRelay::new();
    let alice = relay.join("room", "alice");
    let bob = relay.join("room", "bob");

    alice.session.on_keystroke().unwrap();
    settle().await;

    assert!(bob.session.tracker().is_user_typing(&user("alice")));
    assert_eq!(bob.session.typing_label(&display_names()), "Alice is typing...");
    // Alice never sees herself
    assert!(alice.session.tracker().list_typing_users().is_empty());

    // Keep typing: the indicator stays up past the original deadline
    advance_ms(2000).await;
    alice.session.on_keystroke().unwrap();
    settle().await;
    advance_ms(2000).await;
    assert!(bob.session.tracker().is_user_typing(&user("alice")));

    advance_ms(TEST_TIMEOUT_MS - 2000).await;
    assert!(!bob.session.tracker().is_user_typing(&user("alice")));
    assert_eq!(bob.session.typing_label(&display_names()), "");
    assert_eq!(bob.last_change(), Some((user("alice"), false)));
}

#[tokio::test(start_paused = true)]
async fn test_explicit_stop_clears_peer_immediately() {
    let mut relay = LoopbackRelay::new();
    let alice = relay.join("room", "alice");
    let bob = relay.join("room", "bob");

    alice.session.on_keystroke().unwrap();
    settle().await;
    advance_ms(100).await;

    alice.session.stop_typing().unwrap();
    settle().await;

    assert!(!bob.session.tracker().is_user_typing(&user("alice")));
    assert_eq!(
        *bob.changes.lock(),
        vec![(user("alice"), true), (user("alice"), false)]
    );

    // Nothing further once the original deadline passes
    advance_ms(TEST_TIMEOUT_MS * 2).await;
    assert_eq!(bob.changes.lock().len(), 2);
}

// ============================================================================
// Chat scoping
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_other_chat_never_sees_typing() {
    let mut relay = LoopbackRelay::new();
    let alice = relay.join("room", "alice");
    let carol = relay.join("lobby", "carol");

    alice.session.on_keystroke().unwrap();
    settle().await;
    advance_ms(TEST_TIMEOUT_MS).await;

    assert!(carol.session.tracker().list_typing_users().is_empty());
    assert!(carol.changes.lock().is_empty());
}

// ============================================================================
// Lost stop events
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_lost_stop_heals_after_timeout() {
    let mut relay = LoopbackRelay::new();
    let alice = relay.join("room", "alice");
    let bob = relay.join("room", "bob");
    relay.set_drop_stops(true);

    alice.session.on_keystroke().unwrap();
    settle().await;
    alice.session.stop_typing().unwrap();
    settle().await;

    // The stop never arrived
    assert!(bob.session.tracker().is_user_typing(&user("alice")));

    advance_ms(TEST_TIMEOUT_MS - 1).await;
    assert!(bob.session.tracker().is_user_typing(&user("alice")));

    advance_ms(1).await;
    assert!(!bob.session.tracker().is_user_typing(&user("alice")));
    assert_eq!(bob.last_change(), Some((user("alice"), false)));
}

// ============================================================================
// Labels
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_labels_follow_typing_set() {
    let mut relay = LoopbackRelay::new();
    let alice = relay.join("room", "alice");
    let bob = relay.join("room", "bob");
    let dave = relay.join("room", "dave");
    let erin = relay.join("room", "erin");
    let names = display_names();

    alice.session.on_keystroke().unwrap();
    settle().await;
    assert_eq!(erin.session.typing_label(&names), "Alice is typing...");

    bob.session.on_keystroke().unwrap();
    settle().await;
    assert_eq!(erin.session.typing_label(&names), "Alice and Bob are typing...");

    dave.session.on_keystroke().unwrap();
    settle().await;
    assert_eq!(erin.session.typing_label(&names), "3 people are typing...");

    // Erin is unknown to the others' name lookup
    erin.session.on_keystroke().unwrap();
    bob.session.stop_typing().unwrap();
    dave.session.stop_typing().unwrap();
    settle().await;
    assert_eq!(
        alice.session.typing_label(&names),
        "Someone is typing..."
    );
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_closed_session_stays_quiet() {
    let mut relay = LoopbackRelay::new();
    let alice = relay.join("room", "alice");
    let mut bob = relay.join("room", "bob");

    alice.session.on_keystroke().unwrap();
    settle().await;
    assert_eq!(bob.changes.lock().len(), 1);

    bob.session.close();
    assert!(bob.session.tracker().list_typing_users().is_empty());

    alice.session.on_keystroke().unwrap();
    settle().await;
    advance_ms(TEST_TIMEOUT_MS * 2).await;

    assert_eq!(bob.changes.lock().len(), 1);
    assert!(bob.session.tracker().list_typing_users().is_empty());
}
