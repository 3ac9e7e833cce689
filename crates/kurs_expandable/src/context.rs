//! Shared panel state reachable through [`ContextScope`]
//!
//! The panel root provides an [`ExpandableHandle`] into its scope. Cards,
//! triggers and content blocks built from that scope (at any depth) look it up
//! with [`use_expandable`].

use crate::config::{ExpandBehavior, ExpandDirection, ExpandableConfig, TransitionSpec};
use crate::controller::{ExpansionController, ExpansionPhase, Hook};
use kurs_animation::SpringConfig;
use kurs_core::context::ContextScope;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Root settings every part of a panel reads
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSettings {
    pub expand_direction: ExpandDirection,
    pub expand_behavior: ExpandBehavior,
    pub transition: TransitionSpec,
    pub spring: SpringConfig,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self::from(&ExpandableConfig::default())
    }
}

impl From<&ExpandableConfig> for PanelSettings {
    fn from(config: &ExpandableConfig) -> Self {
        Self {
            expand_direction: config.expand_direction,
            expand_behavior: config.expand_behavior,
            transition: config.transition(),
            spring: config.spring,
        }
    }
}

struct HandleInner {
    /// `None` for a handle used outside any panel
    controller: Option<RefCell<ExpansionController>>,
    settings: PanelSettings,
}

/// Cheap, cloneable access to one panel's expansion state
#[derive(Clone)]
pub struct ExpandableHandle {
    inner: Rc<HandleInner>,
}

impl ExpandableHandle {
    pub fn new(controller: ExpansionController, settings: PanelSettings) -> Self {
        Self {
            inner: Rc::new(HandleInner {
                controller: Some(RefCell::new(controller)),
                settings,
            }),
        }
    }

    /// A collapsed, inert handle. Toggling it does nothing.
    pub fn detached() -> Self {
        Self {
            inner: Rc::new(HandleInner {
                controller: None,
                settings: PanelSettings::default(),
            }),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.controller.is_some()
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.inner.settings
    }

    pub fn is_expanded(&self) -> bool {
        self.inner
            .controller
            .as_ref()
            .is_some_and(|c| c.borrow().is_expanded())
    }

    /// Choose between two values by the current state, e.g. a button label
    pub fn pick<T>(&self, expanded: T, collapsed: T) -> T {
        if self.is_expanded() {
            expanded
        } else {
            collapsed
        }
    }

    pub fn toggle(&self) {
        let Some(controller) = &self.inner.controller else {
            tracing::debug!("toggle ignored outside an expandable panel");
            return;
        };
        let next = !controller.borrow().is_expanded();
        self.request(controller, next);
    }

    pub fn set_expanded(&self, expanded: bool) {
        let Some(controller) = &self.inner.controller else {
            return;
        };
        if controller.borrow().is_expanded() != expanded {
            self.request(controller, expanded);
        } else {
            self.sync();
        }
    }

    /// The owner's write callback runs with no borrow held, so it may read
    /// the panel back through any handle.
    fn request(&self, controller: &RefCell<ExpansionController>, value: bool) {
        let writer = controller.borrow().external_writer();
        match writer {
            Some(write) => write(value),
            None => controller.borrow_mut().request(value),
        }
        let started = controller.borrow_mut().sync();
        if let Some(started) = started {
            started.fire();
        }
    }

    /// Observe external changes; fires the start hook for a new transition
    pub fn sync(&self) -> Option<ExpansionPhase> {
        let controller = self.inner.controller.as_ref()?;
        let started = controller.borrow_mut().sync();
        started.map(|s| s.fire())
    }

    /// Number of transitions observed so far
    pub fn serial(&self) -> u64 {
        self.inner
            .controller
            .as_ref()
            .map_or(0, |c| c.borrow().serial())
    }

    pub fn phase(&self) -> ExpansionPhase {
        self.inner
            .controller
            .as_ref()
            .map_or(ExpansionPhase::Collapsed, |c| c.borrow().phase())
    }

    /// Stored end hook for `phase`; invoked by the animation layer
    pub fn end_hook(&self, phase: ExpansionPhase) -> Option<Hook> {
        self.inner
            .controller
            .as_ref()
            .and_then(|c| c.borrow().hooks().end_hook(phase))
    }

    /// Whether two handles refer to the same panel
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ExpandableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandableHandle")
            .field("attached", &self.is_attached())
            .field("expanded", &self.is_expanded())
            .finish()
    }
}

/// Nearest panel handle visible from `scope`, or an inert one
pub fn use_expandable(scope: &ContextScope) -> ExpandableHandle {
    match scope.get::<ExpandableHandle>() {
        Some(handle) => (*handle).clone(),
        None => {
            tracing::debug!(depth = scope.depth(), "no expandable panel in scope");
            ExpandableHandle::detached()
        }
    }
}
