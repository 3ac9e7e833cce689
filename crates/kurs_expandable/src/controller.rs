//! Expansion state and lifecycle hooks
//!
//! [`ExpansionController`] owns the one authoritative expanded flag of a panel.
//! The flag is either held internally or read/written through callbacks
//! supplied by an ancestor ([`ExpansionState::External`]).
//!
//! A flat state machine tracks the last observed phase so start hooks fire
//! exactly once per transition, however many consumers call [`sync`].
//!
//! [`sync`]: ExpansionController::sync

use kurs_core::fsm::StateMachine;
use std::fmt;
use std::rc::Rc;

/// A lifecycle callback
pub type Hook = Rc<dyn Fn()>;

/// Source of truth for the expanded flag
#[derive(Clone)]
pub enum ExpansionState {
    Internal(bool),
    External {
        read: Rc<dyn Fn() -> bool>,
        write: Rc<dyn Fn(bool)>,
    },
}

impl ExpansionState {
    pub fn external(read: impl Fn() -> bool + 'static, write: impl Fn(bool) + 'static) -> Self {
        Self::External {
            read: Rc::new(read),
            write: Rc::new(write),
        }
    }

    fn current(&self) -> bool {
        match self {
            Self::Internal(value) => *value,
            Self::External { read, .. } => read(),
        }
    }

    fn request(&mut self, value: bool) {
        match self {
            Self::Internal(current) => *current = value,
            Self::External { write, .. } => write(value),
        }
    }

    fn writer(&self) -> Option<Rc<dyn Fn(bool)>> {
        match self {
            Self::Internal(_) => None,
            Self::External { write, .. } => Some(write.clone()),
        }
    }
}

impl fmt::Debug for ExpansionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(value) => f.debug_tuple("Internal").field(value).finish(),
            Self::External { read, .. } => f
                .debug_struct("External")
                .field("current", &read())
                .finish_non_exhaustive(),
        }
    }
}

/// Callbacks fired around expand/collapse transitions
#[derive(Clone, Default)]
pub struct LifecycleHooks {
    pub on_expand_start: Option<Hook>,
    pub on_expand_end: Option<Hook>,
    pub on_collapse_start: Option<Hook>,
    pub on_collapse_end: Option<Hook>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_expand_start(mut self, f: impl Fn() + 'static) -> Self {
        self.on_expand_start = Some(Rc::new(f));
        self
    }

    pub fn on_expand_end(mut self, f: impl Fn() + 'static) -> Self {
        self.on_expand_end = Some(Rc::new(f));
        self
    }

    pub fn on_collapse_start(mut self, f: impl Fn() + 'static) -> Self {
        self.on_collapse_start = Some(Rc::new(f));
        self
    }

    pub fn on_collapse_end(mut self, f: impl Fn() + 'static) -> Self {
        self.on_collapse_end = Some(Rc::new(f));
        self
    }

    /// Hook fired when a transition into `phase` begins
    pub fn start_hook(&self, phase: ExpansionPhase) -> Option<Hook> {
        match phase {
            ExpansionPhase::Expanded => self.on_expand_start.clone(),
            ExpansionPhase::Collapsed => self.on_collapse_start.clone(),
        }
    }

    /// Hook fired once a transition into `phase` has visually finished
    pub fn end_hook(&self, phase: ExpansionPhase) -> Option<Hook> {
        match phase {
            ExpansionPhase::Expanded => self.on_expand_end.clone(),
            ExpansionPhase::Collapsed => self.on_collapse_end.clone(),
        }
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("on_expand_start", &self.on_expand_start.is_some())
            .field("on_expand_end", &self.on_expand_end.is_some())
            .field("on_collapse_start", &self.on_collapse_start.is_some())
            .field("on_collapse_end", &self.on_collapse_end.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpansionPhase {
    Collapsed,
    Expanded,
}

impl ExpansionPhase {
    pub fn from_expanded(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpansionEvent {
    Expand,
    Collapse,
}

/// A transition that has been observed but whose start hook has not run yet
#[must_use = "the start hook only runs when the transition is fired"]
pub struct StartedTransition {
    pub phase: ExpansionPhase,
    pub serial: u64,
    hook: Option<Hook>,
}

impl StartedTransition {
    /// Run the start hook
    pub fn fire(self) -> ExpansionPhase {
        if let Some(hook) = &self.hook {
            hook();
        }
        self.phase
    }
}

impl fmt::Debug for StartedTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartedTransition")
            .field("phase", &self.phase)
            .field("serial", &self.serial)
            .finish()
    }
}

/// Expanded/collapsed state of one panel instance
pub struct ExpansionController {
    state: ExpansionState,
    machine: StateMachine<ExpansionPhase, ExpansionEvent>,
    hooks: LifecycleHooks,
    serial: u64,
}

impl ExpansionController {
    /// Resolve the state source once; the observed phase starts at its value
    pub fn new(state: ExpansionState, hooks: LifecycleHooks) -> Self {
        let initial = ExpansionPhase::from_expanded(state.current());
        let machine = StateMachine::builder(initial)
            .on(
                ExpansionPhase::Collapsed,
                ExpansionEvent::Expand,
                ExpansionPhase::Expanded,
            )
            .on(
                ExpansionPhase::Expanded,
                ExpansionEvent::Collapse,
                ExpansionPhase::Collapsed,
            )
            .build();

        Self {
            state,
            machine,
            hooks,
            serial: 0,
        }
    }

    pub fn uncontrolled(initial_expanded: bool, hooks: LifecycleHooks) -> Self {
        Self::new(ExpansionState::Internal(initial_expanded), hooks)
    }

    pub fn controlled(
        read: impl Fn() -> bool + 'static,
        write: impl Fn(bool) + 'static,
        hooks: LifecycleHooks,
    ) -> Self {
        Self::new(ExpansionState::external(read, write), hooks)
    }

    /// Current authoritative value
    pub fn is_expanded(&self) -> bool {
        self.state.current()
    }

    /// Phase as of the last [`sync`](Self::sync)
    pub fn phase(&self) -> ExpansionPhase {
        self.machine.current_state()
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.state, ExpansionState::External { .. })
    }

    /// Number of transitions observed so far
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn hooks(&self) -> &LifecycleHooks {
        &self.hooks
    }

    /// Write callback of an externally owned flag. Callers sharing the
    /// controller through a `RefCell` invoke it without holding a borrow.
    pub fn external_writer(&self) -> Option<Rc<dyn Fn(bool)>> {
        self.state.writer()
    }

    /// Set an internally held flag; external flags go through their writer
    pub fn request(&mut self, expanded: bool) {
        self.state.request(expanded);
    }

    /// Flip the flag. External state is asked to change through its write
    /// callback; the flip is observed immediately if the owner applied it.
    pub fn toggle(&mut self) -> Option<StartedTransition> {
        let next = !self.state.current();
        self.state.request(next);
        self.sync()
    }

    /// Request a specific value
    pub fn set_expanded(&mut self, expanded: bool) -> Option<StartedTransition> {
        if self.state.current() != expanded {
            self.state.request(expanded);
        }
        self.sync()
    }

    /// Compare the authoritative value with the last observed phase
    pub fn sync(&mut self) -> Option<StartedTransition> {
        let event = if self.state.current() {
            ExpansionEvent::Expand
        } else {
            ExpansionEvent::Collapse
        };
        let phase = self.machine.send(event)?;
        self.serial += 1;
        tracing::debug!(?phase, serial = self.serial, "expansion transition");

        Some(StartedTransition {
            phase,
            serial: self.serial,
            hook: self.hooks.start_hook(phase),
        })
    }

    /// Recent observed transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(ExpansionPhase, ExpansionEvent, ExpansionPhase)> {
        self.machine.history()
    }
}

impl fmt::Debug for ExpansionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionController")
            .field("state", &self.state)
            .field("phase", &self.phase())
            .field("serial", &self.serial)
            .finish()
    }
}
