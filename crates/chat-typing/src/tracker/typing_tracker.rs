//! Typing presence tracker
//!
//! One tracker belongs to one open chat. It owns every timer it starts; the
//! only way to cancel them is through the tracker's operations, `dispose`, or
//! dropping the tracker.

use super::builder::TypingTrackerBuilder;
use super::timer::TimerHandle;
use crate::channel::{ChannelError, TypingChannel};
use crate::label::{compose_typing_label, DisplayNames};
use chat_core::{ChatId, TypingEvent, UserId};
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Callback invoked with `(user_id, is_typing)` when a remote user's typing state changes
pub type TypingCallback = Arc<dyn Fn(&UserId, bool) + Send + Sync>;

/// Outcome of [`TypingTracker::announce_typing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    /// The event was handed to the channel
    Sent,
    /// Channel, chat or user was missing (or the tracker is disposed); nothing was sent
    Skipped,
}

/// Outcome of [`TypingTracker::ingest_remote_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// The event belonged to the active chat and was applied
    Applied,
    /// The event was for another chat (or the tracker is disposed); nothing changed
    Discarded,
}

/// Per-user record of a remote typing indicator
#[derive(Debug)]
struct TypingEntry {
    expiry: TimerHandle,
    /// Position in which the user started typing, for stable listing
    order: u64,
}

#[derive(Debug, Default)]
struct TypingState {
    users: HashMap<UserId, TypingEntry>,
    local_timer: Option<TimerHandle>,
    generation: u64,
    next_order: u64,
    disposed: bool,
}

impl TypingState {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn cancel_all(&mut self) {
        if let Some(timer) = self.local_timer.take() {
            timer.cancel();
        }
        for (_, entry) in self.users.drain() {
            entry.expiry.cancel();
        }
    }
}

struct Shared {
    chat_id: Option<ChatId>,
    user_id: Option<UserId>,
    channel: Option<Arc<dyn TypingChannel>>,
    on_change: Option<TypingCallback>,
    timeout: Duration,
    disposed: AtomicBool,
    state: Mutex<TypingState>,
}

impl Shared {
    fn announce(self: &Arc<Self>, is_typing: bool) -> Result<Announcement, ChannelError> {
        if self.emit(is_typing)? == Announcement::Skipped {
            return Ok(Announcement::Skipped);
        }

        let mut state = self.state.lock();
        if state.disposed {
            return Ok(Announcement::Sent);
        }
        if let Some(timer) = state.local_timer.take() {
            timer.cancel();
        }
        if is_typing {
            let generation = state.next_generation();
            let weak = Arc::downgrade(self);
            state.local_timer = Some(TimerHandle::spawn(generation, self.timeout, move || {
                Self::local_timer_fired(&weak, generation);
            }));
        }

        Ok(Announcement::Sent)
    }

    /// Hand one event to the channel without touching the local timer
    fn emit(&self, is_typing: bool) -> Result<Announcement, ChannelError> {
        let (Some(channel), Some(chat_id), Some(user_id)) =
            (&self.channel, &self.chat_id, &self.user_id)
        else {
            tracing::trace!(is_typing, "Typing announcement skipped: channel, chat or user missing");
            return Ok(Announcement::Skipped);
        };

        if self.is_disposed() {
            return Ok(Announcement::Skipped);
        }

        let event = TypingEvent::new(chat_id.clone(), user_id.clone(), is_typing);
        channel.send(&event)?;

        tracing::debug!(
            chat_id = %chat_id,
            user_id = %user_id,
            is_typing,
            "Announced typing state"
        );

        Ok(Announcement::Sent)
    }

    fn local_timer_fired(weak: &Weak<Self>, generation: u64) {
        let Some(shared) = weak.upgrade() else {
            return;
        };

        {
            let mut state = shared.state.lock();
            if state.disposed {
                return;
            }
            // A newer announcement replaced this timer
            if state.local_timer.as_ref().map(TimerHandle::generation) != Some(generation) {
                return;
            }
            state.local_timer = None;
        }

        // The timer slot is already cleared; a keystroke racing this send owns
        // whatever timer is installed next
        if let Err(e) = shared.emit(false) {
            tracing::warn!(error = %e, "Failed to announce typing stop after timeout");
        }
    }

    fn ingest(self: &Arc<Self>, event: &TypingEvent) -> Ingest {
        let Some(active) = &self.chat_id else {
            return Ingest::Discarded;
        };
        if !event.belongs_to(active) {
            tracing::trace!(
                active_chat = %active,
                event_chat = %event.chat_id,
                user_id = %event.user_id,
                "Discarded typing event for another chat"
            );
            return Ingest::Discarded;
        }

        {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            if state.disposed {
                return Ingest::Discarded;
            }

            if event.is_typing {
                let generation = state.next_generation();
                let weak = Arc::downgrade(self);
                let user_id = event.user_id.clone();
                let expiry = TimerHandle::spawn(generation, self.timeout, move || {
                    Self::expiry_fired(&weak, &user_id, generation);
                });

                match state.users.entry(event.user_id.clone()) {
                    Entry::Occupied(mut occupied) => {
                        std::mem::replace(&mut occupied.get_mut().expiry, expiry).cancel();
                    }
                    Entry::Vacant(vacant) => {
                        let order = state.next_order;
                        state.next_order += 1;
                        vacant.insert(TypingEntry { expiry, order });
                    }
                }
            } else if let Some(entry) = state.users.remove(&event.user_id) {
                entry.expiry.cancel();
            }
        }

        tracing::trace!(
            chat_id = %event.chat_id,
            user_id = %event.user_id,
            is_typing = event.is_typing,
            "Applied remote typing event"
        );

        self.notify(&event.user_id, event.is_typing);
        Ingest::Applied
    }

    fn expiry_fired(weak: &Weak<Self>, user_id: &UserId, generation: u64) {
        let Some(shared) = weak.upgrade() else {
            return;
        };

        {
            let mut state = shared.state.lock();
            if state.disposed {
                return;
            }
            let current = state.users.get(user_id).map(|entry| entry.expiry.generation());
            if current != Some(generation) {
                return;
            }
            state.users.remove(user_id);
        }

        tracing::debug!(user_id = %user_id, "Typing indicator expired");
        shared.notify(user_id, false);
    }

    fn notify(&self, user_id: &UserId, is_typing: bool) {
        if self.is_disposed() {
            return;
        }
        if let Some(callback) = &self.on_change {
            callback(user_id, is_typing);
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.state.get_mut().cancel_all();
    }
}

/// Typing presence tracker for one active chat
///
/// All operations are synchronous and never block. Timers are Tokio tasks, so
/// the tracker must be used from within a Tokio runtime. The state lock is
/// never held while the channel or the notification callback runs, so the
/// callback may query the tracker.
pub struct TypingTracker {
    shared: Arc<Shared>,
}

impl TypingTracker {
    /// Start building a tracker
    pub fn builder() -> TypingTrackerBuilder {
        TypingTrackerBuilder::new()
    }

    pub(super) fn from_parts(
        chat_id: Option<ChatId>,
        user_id: Option<UserId>,
        channel: Option<Arc<dyn TypingChannel>>,
        on_change: Option<TypingCallback>,
        timeout: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                chat_id,
                user_id,
                channel,
                on_change,
                timeout,
                disposed: AtomicBool::new(false),
                state: Mutex::new(TypingState::default()),
            }),
        }
    }

    /// Second handle onto the same tracker, for the session's inbound pump
    pub(crate) fn share(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Announce the local user's typing state
    ///
    /// Every call emits `{ chatId, userId, isTyping }`; repeated `true` calls are
    /// not suppressed, they only restart the stop timer. When the stop timer
    /// fires the tracker announces `false` on its own.
    ///
    /// The send is fire-and-forget and does not wait for delivery. A channel
    /// failure is returned unchanged and leaves the timer state untouched.
    pub fn announce_typing(&self, is_typing: bool) -> Result<Announcement, ChannelError> {
        self.shared.announce(is_typing)
    }

    /// Apply a typing event received from the channel
    ///
    /// Events for any chat other than the active one are discarded without
    /// touching state or invoking the callback.
    pub fn ingest_remote_event(&self, event: &TypingEvent) -> Ingest {
        self.shared.ingest(event)
    }

    /// Users currently typing, in the order they started
    pub fn list_typing_users(&self) -> Vec<UserId> {
        let state = self.shared.state.lock();
        let mut users: Vec<(&UserId, &TypingEntry)> = state.users.iter().collect();
        users.sort_by_key(|(_, entry)| entry.order);
        users.into_iter().map(|(id, _)| id.clone()).collect()
    }

    /// Check whether a user is currently typing
    pub fn is_user_typing(&self, user_id: &UserId) -> bool {
        self.shared.state.lock().users.contains_key(user_id)
    }

    /// Number of users currently typing
    pub fn typing_count(&self) -> usize {
        self.shared.state.lock().users.len()
    }

    /// Compose the typing indicator label for the current set
    pub fn compose_typing_label<N>(&self, names: &N) -> String
    where
        N: DisplayNames + ?Sized,
    {
        compose_typing_label(&self.list_typing_users(), names)
    }

    /// Cancel every timer and clear the typing set
    ///
    /// Must be called when the owning chat closes. After this no timer mutates
    /// state or invokes the callback, announcements are skipped and remote
    /// events are discarded. Calling it again is a no-op.
    pub fn dispose(&self) {
        if self.shared.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        let mut state = self.shared.state.lock();
        state.disposed = true;
        let cleared = state.users.len();
        state.cancel_all();
        drop(state);

        tracing::debug!(
            chat_id = ?self.shared.chat_id.as_ref().map(ChatId::as_str),
            cleared,
            "Typing tracker disposed"
        );
    }

    /// Check whether the tracker has been disposed
    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }

    /// Active chat, if any
    pub fn chat_id(&self) -> Option<&ChatId> {
        self.shared.chat_id.as_ref()
    }

    /// Local user, if any
    pub fn user_id(&self) -> Option<&UserId> {
        self.shared.user_id.as_ref()
    }

    /// Debounce and expiry interval
    pub fn timeout(&self) -> Duration {
        self.shared.timeout
    }

    /// Check whether the local stop timer is pending
    pub fn has_pending_stop(&self) -> bool {
        self.shared.state.lock().local_timer.is_some()
    }
}

impl std::fmt::Debug for TypingTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingTracker")
            .field("chat_id", &self.shared.chat_id)
            .field("user_id", &self.shared.user_id)
            .field("timeout", &self.shared.timeout)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
