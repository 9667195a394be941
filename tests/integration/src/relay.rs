//! In-process relay
//!
//! Broadcasts every outbound message of a participant to all other
//! participants, regardless of chat, the way a naive gateway fan-out would.
//! Scoping is left to the receiving trackers.

use crate::fixtures::test_config;
use chat_common::TypingConfig;
use chat_core::{ChatId, UserId};
use chat_typing::{ChannelMessage, ChatSession, MpscChannel, TypingCallback};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Recorded `(user_id, is_typing)` notifications
pub type Changes = Arc<Mutex<Vec<(UserId, bool)>>>;

struct Member {
    id: usize,
    inbound: mpsc::Sender<ChannelMessage>,
}

/// A joined participant
pub struct Participant {
    pub session: ChatSession,
    pub changes: Changes,
}

impl Participant {
    /// Last notification received, if any
    pub fn last_change(&self) -> Option<(UserId, bool)> {
        self.changes.lock().last().cloned()
    }
}

/// Loopback relay between chat sessions
pub struct LoopbackRelay {
    config: TypingConfig,
    members: Arc<Mutex<Vec<Member>>>,
    drop_stops: Arc<AtomicBool>,
    tasks: Vec<JoinHandle<()>>,
    next_id: usize,
}

impl LoopbackRelay {
    /// Create a relay using the test configuration
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a relay with a custom typing configuration
    pub fn with_config(config: TypingConfig) -> Self {
        Self {
            config,
            members: Arc::new(Mutex::new(Vec::new())),
            drop_stops: Arc::new(AtomicBool::new(false)),
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Lose every `isTyping: false` message from now on
    pub fn set_drop_stops(&self, drop_stops: bool) {
        self.drop_stops.store(drop_stops, Ordering::SeqCst);
    }

    /// Open a session for `user` in `chat` and connect it to the relay
    pub fn join(&mut self, chat: &str, user: &str) -> Participant {
        let buffer = self.config.channel_buffer;
        let (channel, mut outbound) = MpscChannel::pair(buffer);
        let (inbound_tx, inbound_rx) = mpsc::channel(buffer);

        let id = self.next_id;
        self.next_id += 1;
        self.members.lock().push(Member {
            id,
            inbound: inbound_tx,
        });

        let members = self.members.clone();
        let drop_stops = self.drop_stops.clone();
        self.tasks.push(tokio::spawn(async move {
            while let Some(message) = outbound.recv().await {
                let is_stop = message.as_typing().is_some_and(|event| !event.is_typing);
                if is_stop && drop_stops.load(Ordering::SeqCst) {
                    continue;
                }

                let targets: Vec<mpsc::Sender<ChannelMessage>> = members
                    .lock()
                    .iter()
                    .filter(|member| member.id != id)
                    .map(|member| member.inbound.clone())
                    .collect();
                for target in targets {
                    let _ = target.try_send(message.clone());
                }
            }
        }));

        let changes: Changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let on_change: TypingCallback = Arc::new(move |user_id: &UserId, is_typing: bool| {
            sink.lock().push((user_id.clone(), is_typing));
        });

        let session = ChatSession::open(
            &self.config,
            ChatId::new(chat),
            UserId::new(user),
            channel,
            inbound_rx,
            Some(on_change),
        );

        Participant { session, changes }
    }
}

impl Default for LoopbackRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoopbackRelay {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
