//! Virtual one-shot timers
//!
//! A [`TimerQueue`] owns a millisecond clock that only moves when the owner
//! advances it, so a widget's delays are driven by the same frame ticks as its
//! animations and can be replayed deterministically in tests.
//!
//! Owners drain due timers in a loop so a fired timer can schedule its
//! successor relative to its own deadline:
//!
//! ```rust
//! use comps_core::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(1000, "tick");
//!
//! let target = timers.now_ms() + 2500;
//! let mut fired = 0;
//! while let Some((_, payload)) = timers.pop_due(target) {
//!     fired += 1;
//!     timers.schedule(1000, payload);
//! }
//! timers.advance_to(target);
//!
//! assert_eq!(fired, 2);
//! assert_eq!(timers.now_ms(), 2500);
//! ```

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

struct Entry<T> {
    deadline_ms: u64,
    /// Scheduling sequence number, breaks deadline ties
    seq: u64,
    payload: T,
}

/// A queue of one-shot timers on a virtual clock
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, Entry<T>>,
    now_ms: u64,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now_ms: 0,
            next_seq: 0,
        }
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `payload` to fire `after_ms` from now
    pub fn schedule(&mut self, after_ms: u64, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Entry {
            deadline_ms: self.now_ms.saturating_add(after_ms),
            seq,
            payload,
        })
    }

    /// Cancel a pending timer, returning its payload
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|entry| entry.payload)
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its deadline.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, T)> {
        let (id, deadline) = self
            .timers
            .iter()
            .filter(|(_, entry)| entry.deadline_ms <= until_ms)
            .min_by_key(|(_, entry)| (entry.deadline_ms, entry.seq))
            .map(|(id, entry)| (id, entry.deadline_ms))?;

        self.now_ms = self.now_ms.max(deadline);
        self.timers.remove(id).map(|entry| (id, entry.payload))
    }

    /// Move the clock forward. Never moves backwards.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Whether a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
