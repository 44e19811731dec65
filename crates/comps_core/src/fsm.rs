//! State Machine Runtime
//!
//! Flat state machines for widget lifecycles. States and events are plain
//! `Copy` enums so every consumer matches them exhaustively.
//!
//! A transition is keyed by `(from, event)`; sending an event that has no
//! transition out of the current state leaves the machine untouched. That is
//! what gives widgets their re-entrancy guards: an `Activate` sent while
//! already `Loading` simply does nothing.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

/// Number of transitions kept for debugging
const HISTORY_LIMIT: usize = 32;

/// Bound shared by state and event types
pub trait FsmKey: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> FsmKey for T {}

/// Builder for creating state machines
pub struct StateMachineBuilder<S: FsmKey, E: FsmKey> {
    initial_state: S,
    transitions: FxHashMap<(S, E), S>,
}

impl<S: FsmKey, E: FsmKey> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: FxHashMap::default(),
        }
    }

    /// Add a transition (from, event, to). A later call for the same
    /// `(from, event)` pair replaces the earlier one.
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.insert((from, event), to);
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: SmallVec::new(),
        }
    }
}

/// A state machine instance
pub struct StateMachine<S: FsmKey, E: FsmKey> {
    current_state: S,
    transitions: FxHashMap<(S, E), S>,
    /// Most recent transitions, oldest first
    history: SmallVec<[(S, E, S); 8]>,
}

impl<S: FsmKey, E: FsmKey> StateMachine<S, E> {
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        self.transitions.contains_key(&(self.current_state, event))
    }

    /// Send an event. Returns the new state if a transition fired.
    pub fn send(&mut self, event: E) -> Option<S> {
        let from = self.current_state;
        let to = *self.transitions.get(&(from, event))?;

        self.current_state = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));
        tracing::trace!(?from, ?event, ?to, "fsm transition");

        Some(to)
    }

    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
