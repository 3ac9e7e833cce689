//! State Machine Runtime
//!
//! Flat, typed state machines for widget interaction states. A machine is a
//! transition table keyed by `(state, event)` plus a bounded history of the
//! transitions it took. Callers react to the state [`StateMachine::send`]
//! returns.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Number of transitions kept in the history ring
const HISTORY_LIMIT: usize = 64;

/// Bounds shared by state and event types
pub trait MachineKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> MachineKey for T {}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: FxHashMap<(S, E), S>,
}

impl<S: MachineKey, E: MachineKey> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: FxHashMap::default(),
        }
    }

    /// Add a transition (from, event, to). A later rule for the same
    /// `(from, event)` pair replaces the earlier one.
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        if let Some(previous) = self.transitions.insert((from, event), to) {
            tracing::debug!(?from, ?event, ?previous, ?to, "fsm transition replaced");
        }
        self
    }

    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: VecDeque::new(),
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: FxHashMap<(S, E), S>,
    history: VecDeque<(S, E, S)>,
}

impl<S: MachineKey, E: MachineKey> StateMachine<S, E> {
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Most recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, E, S)> {
        self.history.iter()
    }

    /// Send an event; returns the new state if a transition fired
    pub fn send(&mut self, event: E) -> Option<S> {
        let current = self.current_state;
        let to_state = *self.transitions.get(&(current, event))?;

        self.current_state = to_state;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((current, event, to_state));
        tracing::trace!(from = ?current, ?event, to = ?to_state, "fsm transition");

        Some(to_state)
    }
}

impl<S: Debug, E> Debug for StateMachine<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current_state", &self.current_state)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Door {
        Closed,
        Open,
        Locked,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Cmd {
        Open,
        Close,
        Lock,
        Unlock,
    }

    fn door() -> StateMachine<Door, Cmd> {
        StateMachine::builder(Door::Closed)
            .on(Door::Closed, Cmd::Open, Door::Open)
            .on(Door::Open, Cmd::Close, Door::Closed)
            .on(Door::Closed, Cmd::Lock, Door::Locked)
            .on(Door::Locked, Cmd::Unlock, Door::Closed)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = door();
        assert_eq!(fsm.send(Cmd::Open), Some(Door::Open));
        assert_eq!(fsm.send(Cmd::Close), Some(Door::Closed));
        assert_eq!(fsm.send(Cmd::Lock), Some(Door::Locked));
        assert_eq!(fsm.current_state(), Door::Locked);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = door();
        fsm.send(Cmd::Lock);
        assert_eq!(fsm.send(Cmd::Open), None);
        assert_eq!(fsm.current_state(), Door::Locked);
        assert_eq!(fsm.history().count(), 1);
        assert_eq!(fsm.send(Cmd::Unlock), Some(Door::Closed));
    }

    #[test]
    fn test_later_rule_replaces_earlier() {
        let mut fsm = StateMachine::builder(Door::Closed)
            .on(Door::Closed, Cmd::Open, Door::Locked)
            .on(Door::Closed, Cmd::Open, Door::Open)
            .build();
        assert_eq!(fsm.send(Cmd::Open), Some(Door::Open));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = door();
        for _ in 0..HISTORY_LIMIT {
            fsm.send(Cmd::Open);
            fsm.send(Cmd::Close);
        }
        assert_eq!(fsm.history().count(), HISTORY_LIMIT);
        assert_eq!(
            fsm.history().last(),
            Some(&(Door::Open, Cmd::Close, Door::Closed))
        );
    }
}
