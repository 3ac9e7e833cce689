//! One complete panel instance
//!
//! An [`ExpandablePanel`] wires a root, a trigger, a card and any number of
//! content blocks to the same expanded flag and drives them from one `tick`.
//! It also decides when a transition has visually finished and calls the
//! stored end hook.

use crate::card::ExpandableCard;
use crate::config::{ContentConfig, PanelConfig};
use crate::content::ExpandableContent;
use crate::context::ExpandableHandle;
use crate::controller::{ExpansionPhase, ExpansionState, LifecycleHooks};
use crate::error::{ExpandableError, Result};
use crate::reveal::Presence;
use crate::root::{Expandable, ExpandableTrigger};
use crate::size::Size;
use kurs_animation::{Animated, VisualTarget};
use kurs_core::context::ContextScope;
use std::rc::Rc;
use std::time::Duration;

/// Describes a panel to build
#[derive(Clone, Debug, Default)]
pub struct PanelBuilder {
    config: PanelConfig,
    hooks: LifecycleHooks,
    state: Option<ExpansionState>,
    contents: Vec<(ContentConfig, usize)>,
}

impl PanelBuilder {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn hooks(mut self, hooks: LifecycleHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Let the caller own the expanded flag
    pub fn controlled(
        mut self,
        read: impl Fn() -> bool + 'static,
        write: impl Fn(bool) + 'static,
    ) -> Self {
        self.state = Some(ExpansionState::external(read, write));
        self
    }

    /// Add a content block with `children` staggered children
    pub fn content(mut self, config: ContentConfig, children: usize) -> Self {
        self.contents.push((config, children));
        self
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Build the panel under `parent`. Without explicit content blocks, one
    /// block is built from the `[content]` config.
    pub fn build(&self, parent: &Rc<ContextScope>) -> ExpandablePanel {
        let state = self
            .state
            .clone()
            .unwrap_or(ExpansionState::Internal(self.config.panel.initial_expanded));
        let root = Expandable::with_state(parent, &self.config.panel, state, self.hooks.clone());

        let card_scope = root.scope().child();
        let trigger = ExpandableTrigger::new(&card_scope);
        let card = ExpandableCard::new(&card_scope, self.config.card.clone());

        let body_scope = card_scope.child();
        let contents = if self.contents.is_empty() {
            vec![ExpandableContent::new(&body_scope, &self.config.content)]
        } else {
            self.contents
                .iter()
                .map(|(config, children)| {
                    ExpandableContent::new(&body_scope, config).with_children(*children)
                })
                .collect()
        };

        let seen_serial = root.handle().serial();
        ExpandablePanel {
            root,
            trigger,
            card,
            contents,
            seen_serial,
            awaiting_end: None,
        }
    }
}

/// Rendered state of one content block
#[derive(Clone, Debug, PartialEq)]
pub struct ContentFrame {
    pub presence: Presence,
    pub height: f32,
    pub visual: VisualTarget,
    pub children: Vec<VisualTarget>,
}

/// Rendered state of a whole panel for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct PanelFrame {
    pub expanded: bool,
    pub card: Size,
    pub footprint: Size,
    pub contents: Vec<ContentFrame>,
}

#[derive(Debug)]
pub struct ExpandablePanel {
    root: Expandable,
    trigger: ExpandableTrigger,
    card: ExpandableCard,
    contents: Vec<ExpandableContent>,
    seen_serial: u64,
    /// Phase whose end hook is due once every part settles
    awaiting_end: Option<ExpansionPhase>,
}

impl ExpandablePanel {
    pub fn builder(config: PanelConfig) -> PanelBuilder {
        PanelBuilder::new(config)
    }

    pub fn handle(&self) -> &ExpandableHandle {
        self.root.handle()
    }

    pub fn scope(&self) -> &Rc<ContextScope> {
        self.root.scope()
    }

    pub fn is_expanded(&self) -> bool {
        self.root.is_expanded()
    }

    pub fn toggle(&self) {
        self.root.toggle();
    }

    /// Pointer click on the trigger
    pub fn click(&self) {
        self.trigger.click();
    }

    pub fn hover_start(&mut self) {
        self.card.on_hover_start();
    }

    pub fn hover_end(&mut self) {
        self.card.on_hover_end();
    }

    pub fn card(&self) -> &ExpandableCard {
        &self.card
    }

    pub fn contents(&self) -> &[ExpandableContent] {
        &self.contents
    }

    pub fn measure_card(&mut self, natural: Size) {
        self.card.measure(natural);
    }

    pub fn measure_content(&mut self, index: usize, natural: Size) -> Result<()> {
        let count = self.contents.len();
        let content = self
            .contents
            .get_mut(index)
            .ok_or(ExpandableError::ContentIndex { index, count })?;
        content.measure(natural);
        Ok(())
    }

    /// Advance every part by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.card.tick(dt);
        for content in &mut self.contents {
            content.tick(dt);
        }

        let handle = self.root.handle();
        let serial = handle.serial();
        if serial != self.seen_serial {
            // A newer transition supersedes any end still pending
            self.seen_serial = serial;
            self.awaiting_end = Some(handle.phase());
        }

        if let Some(phase) = self.awaiting_end {
            if self.parts_settled() {
                self.awaiting_end = None;
                tracing::debug!(?phase, "panel transition finished");
                if let Some(hook) = handle.end_hook(phase) {
                    hook();
                }
            }
        }
    }

    fn parts_settled(&self) -> bool {
        self.card.is_settled() && self.contents.iter().all(ExpandableContent::is_settled)
    }

    /// Nothing left to animate and no hover toggle waiting to fire
    pub fn is_settled(&self) -> bool {
        self.awaiting_end.is_none()
            && self.root.handle().serial() == self.seen_serial
            && self.card.pending_hover() == 0
            && self.parts_settled()
    }

    pub fn frame(&self) -> PanelFrame {
        PanelFrame {
            expanded: self.is_expanded(),
            card: self.card.size(),
            footprint: self.card.footprint(),
            contents: self
                .contents
                .iter()
                .map(|c| ContentFrame {
                    presence: c.presence(),
                    height: c.height(),
                    visual: c.visual(),
                    children: c.child_visuals(),
                })
                .collect(),
        }
    }
}

impl Animated for ExpandablePanel {
    fn step(&mut self, dt: f32) {
        self.tick(Duration::from_secs_f32(dt.max(0.0)));
    }

    fn is_settled(&self) -> bool {
        ExpandablePanel::is_settled(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn logged_hooks(log: &Rc<RefCell<Vec<&'static str>>>) -> LifecycleHooks {
        let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
        LifecycleHooks::new()
            .on_expand_start(move || a.borrow_mut().push("expand-start"))
            .on_expand_end(move || b.borrow_mut().push("expand-end"))
            .on_collapse_start(move || c.borrow_mut().push("collapse-start"))
            .on_collapse_end(move || d.borrow_mut().push("collapse-end"))
    }

    fn run_until_settled(panel: &mut ExpandablePanel) -> usize {
        for frame in 1..=600 {
            panel.tick(FRAME);
            if panel.is_settled() {
                return frame;
            }
        }
        panic!("panel did not settle");
    }

    #[test]
    fn test_end_hook_after_everything_settles() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut panel = PanelBuilder::new(PanelConfig::default())
            .hooks(logged_hooks(&log))
            .content(ContentConfig::default().with_preset("fade"), 0)
            .build(&ContextScope::root());
        panel.measure_content(0, Size::new(320.0, 120.0)).unwrap();

        panel.click();
        assert_eq!(*log.borrow(), vec!["expand-start"]);
        panel.tick(FRAME);
        assert_eq!(log.borrow().len(), 1);

        run_until_settled(&mut panel);
        assert_eq!(*log.borrow(), vec!["expand-start", "expand-end"]);

        panel.click();
        run_until_settled(&mut panel);
        assert_eq!(
            *log.borrow(),
            vec!["expand-start", "expand-end", "collapse-start", "collapse-end"]
        );
    }

    #[test]
    fn test_superseded_transition_has_no_end() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut panel = PanelBuilder::new(PanelConfig::default())
            .hooks(logged_hooks(&log))
            .build(&ContextScope::root());
        panel.measure_card(Size::new(320.0, 600.0));

        panel.toggle();
        for _ in 0..5 {
            panel.tick(FRAME);
        }
        panel.toggle();
        run_until_settled(&mut panel);

        assert_eq!(
            *log.borrow(),
            vec!["expand-start", "collapse-start", "collapse-end"]
        );
    }

    #[test]
    fn test_pending_collapse_does_not_hold_expand_end() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut config = PanelConfig::default();
        config.card.hover_to_expand = true;
        config.card.collapse_delay = 2000;
        let mut panel = PanelBuilder::new(config)
            .hooks(logged_hooks(&log))
            .build(&ContextScope::root());
        panel.measure_card(Size::new(320.0, 600.0));

        panel.hover_start();
        panel.tick(FRAME);
        assert!(panel.is_expanded());
        panel.hover_end();
        assert_eq!(panel.card().pending_hover(), 1);

        // Springs settle inside the 2s collapse delay
        for _ in 0..110 {
            panel.tick(FRAME);
        }
        assert_eq!(*log.borrow(), vec!["expand-start", "expand-end"]);
        assert!(panel.is_expanded());
        assert!(!panel.is_settled());

        run_until_settled(&mut panel);
        assert_eq!(
            *log.borrow(),
            vec!["expand-start", "expand-end", "collapse-start", "collapse-end"]
        );
    }

    #[test]
    fn test_measure_content_out_of_range() {
        let mut panel = PanelBuilder::new(PanelConfig::default()).build(&ContextScope::root());
        let err = panel.measure_content(3, Size::ZERO).unwrap_err();
        assert!(matches!(err, ExpandableError::ContentIndex { index: 3, count: 1 }));
    }

    #[test]
    fn test_frame_reports_every_part() {
        let mut panel = PanelBuilder::new(PanelConfig::default())
            .content(ContentConfig::default().with_preset("slide-up").staggered(0.1), 3)
            .build(&ContextScope::root());
        panel.measure_card(Size::new(300.0, 500.0));
        panel.measure_content(0, Size::new(300.0, 240.0)).unwrap();

        let frame = panel.frame();
        assert!(!frame.expanded);
        assert_eq!(frame.card, Size::new(320.0, 211.0));
        assert_eq!(frame.contents[0].presence, Presence::Unmounted);

        panel.toggle();
        run_until_settled(&mut panel);
        let frame = panel.frame();
        assert!(frame.expanded);
        // Vertical: width stays at the collapsed width
        assert_eq!(frame.card, Size::new(320.0, 500.0));
        // Replace behaviour: siblings see the collapsed box
        assert_eq!(frame.footprint, Size::new(320.0, 211.0));
        assert_eq!(frame.contents[0].height, 240.0);
        assert_eq!(frame.contents[0].children.len(), 3);
        assert_eq!(frame.contents[0].visual, VisualTarget::opacity(1.0).with_y(0.0));
    }
}
