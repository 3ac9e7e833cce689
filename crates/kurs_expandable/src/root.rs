//! Panel root and trigger

use crate::config::ExpandableConfig;
use crate::context::{use_expandable, ExpandableHandle, PanelSettings};
use crate::controller::{ExpansionController, ExpansionState, LifecycleHooks};
use kurs_core::context::ContextScope;
use std::rc::Rc;

/// Root of one panel instance: owns the controller and provides it to
/// everything built inside [`scope`](Self::scope).
#[derive(Debug)]
pub struct Expandable {
    scope: Rc<ContextScope>,
    handle: ExpandableHandle,
}

impl Expandable {
    /// Uncontrolled panel starting at `config.initial_expanded`
    pub fn new(parent: &Rc<ContextScope>, config: &ExpandableConfig, hooks: LifecycleHooks) -> Self {
        Self::with_state(
            parent,
            config,
            ExpansionState::Internal(config.initial_expanded),
            hooks,
        )
    }

    /// Panel whose flag is owned by the caller
    pub fn controlled(
        parent: &Rc<ContextScope>,
        config: &ExpandableConfig,
        read: impl Fn() -> bool + 'static,
        write: impl Fn(bool) + 'static,
        hooks: LifecycleHooks,
    ) -> Self {
        Self::with_state(parent, config, ExpansionState::external(read, write), hooks)
    }

    pub fn with_state(
        parent: &Rc<ContextScope>,
        config: &ExpandableConfig,
        state: ExpansionState,
        hooks: LifecycleHooks,
    ) -> Self {
        let controller = ExpansionController::new(state, hooks);
        let handle = ExpandableHandle::new(controller, PanelSettings::from(config));

        let scope = parent.child();
        scope.provide(handle.clone());

        Self { scope, handle }
    }

    /// Scope descendants are built from
    pub fn scope(&self) -> &Rc<ContextScope> {
        &self.scope
    }

    pub fn handle(&self) -> &ExpandableHandle {
        &self.handle
    }

    pub fn is_expanded(&self) -> bool {
        self.handle.is_expanded()
    }

    pub fn toggle(&self) {
        self.handle.toggle();
    }
}

/// Clickable element that flips the nearest panel
#[derive(Debug, Clone)]
pub struct ExpandableTrigger {
    handle: ExpandableHandle,
}

impl ExpandableTrigger {
    pub fn new(scope: &ContextScope) -> Self {
        Self {
            handle: use_expandable(scope),
        }
    }

    pub fn click(&self) {
        self.handle.toggle();
    }

    pub fn is_expanded(&self) -> bool {
        self.handle.is_expanded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_trigger_deep_in_tree_toggles_root() {
        let app = ContextScope::root();
        let panel = Expandable::new(&app, &ExpandableConfig::default(), LifecycleHooks::new());

        let header = panel.scope().child();
        let trigger = ExpandableTrigger::new(&header.child());

        trigger.click();
        assert!(panel.is_expanded());
        trigger.click();
        assert!(!panel.is_expanded());
    }

    #[test]
    fn test_sibling_panels_are_independent() {
        let app = ContextScope::root();
        let a = Expandable::new(&app, &ExpandableConfig::default(), LifecycleHooks::new());
        let b = Expandable::new(&app, &ExpandableConfig::default(), LifecycleHooks::new());

        ExpandableTrigger::new(a.scope()).click();
        assert!(a.is_expanded());
        assert!(!b.is_expanded());
    }

    #[test]
    fn test_controlled_root() {
        let owner = Rc::new(Cell::new(true));
        let (r, w) = (owner.clone(), owner.clone());
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();

        let panel = Expandable::controlled(
            &ContextScope::root(),
            &ExpandableConfig::default(),
            move || r.get(),
            move |v| w.set(v),
            LifecycleHooks::new().on_collapse_start(move || l.borrow_mut().push("collapse")),
        );
        assert!(panel.is_expanded());

        panel.toggle();
        assert!(!owner.get());
        assert_eq!(*log.borrow(), vec!["collapse"]);
    }

    #[test]
    fn test_trigger_outside_panel_is_inert() {
        let trigger = ExpandableTrigger::new(&ContextScope::root());
        trigger.click();
        assert!(!trigger.is_expanded());
    }
}
