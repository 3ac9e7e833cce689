//! The card box of a panel
//!
//! The card animates its own size between the collapsed and expanded specs
//! and can expand on hover after a delay.

use crate::config::{CardConfig, ExpandBehavior};
use crate::context::{use_expandable, ExpandableHandle};
use crate::size::{Size, SizeAnimator};
use kurs_animation::TimerQueue;
use kurs_core::context::ContextScope;
use std::time::Duration;

/// Pending hover action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HoverIntent {
    Expand,
    Collapse,
}

#[derive(Debug)]
pub struct ExpandableCard {
    handle: ExpandableHandle,
    config: CardConfig,
    size: SizeAnimator,
    observed: bool,
    clock: Duration,
    hover_timers: TimerQueue<HoverIntent>,
    hovered: bool,
}

impl ExpandableCard {
    pub fn new(scope: &ContextScope, config: CardConfig) -> Self {
        let handle = use_expandable(scope);
        let settings = handle.settings();
        let expanded = handle.is_expanded();
        let size = SizeAnimator::new(
            config.collapsed_size,
            config.expanded_size,
            settings.expand_direction,
            settings.spring,
            expanded,
        )
        .with_delay(settings.transition.delay);

        Self {
            handle,
            config,
            size,
            observed: expanded,
            clock: Duration::ZERO,
            hover_timers: TimerQueue::new(),
            hovered: false,
        }
    }

    pub fn handle(&self) -> &ExpandableHandle {
        &self.handle
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Report the natural size of the card's content
    pub fn measure(&mut self, natural: Size) {
        self.size.measure(natural);
    }

    /// Rendered size this frame
    pub fn size(&self) -> Size {
        self.size.size()
    }

    pub fn target(&self) -> Size {
        self.size.target()
    }

    /// Box the card takes up when laying out its siblings
    pub fn footprint(&self) -> Size {
        match self.handle.settings().expand_behavior {
            ExpandBehavior::Push => self.size.size(),
            ExpandBehavior::Replace => self.size.collapsed_size(),
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn on_hover_start(&mut self) {
        self.hovered = true;
        if !self.config.hover_to_expand {
            return;
        }
        if self.config.cancel_stale_hover {
            self.hover_timers
                .cancel_where(|intent| *intent == HoverIntent::Collapse);
        }
        if !self.handle.is_expanded() {
            let due = self.clock + self.config.expand_delay();
            self.hover_timers.schedule(due, HoverIntent::Expand);
        }
    }

    pub fn on_hover_end(&mut self) {
        self.hovered = false;
        if !self.config.hover_to_expand {
            return;
        }
        if self.config.cancel_stale_hover {
            self.hover_timers
                .cancel_where(|intent| *intent == HoverIntent::Expand);
        }
        if self.handle.is_expanded() {
            let due = self.clock + self.config.collapse_delay();
            self.hover_timers.schedule(due, HoverIntent::Collapse);
        }
    }

    /// Hover toggles still waiting to fire
    pub fn pending_hover(&self) -> usize {
        self.hover_timers.len()
    }

    /// Advance the card clock, fire due hover toggles and step the springs
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;
        for intent in self.hover_timers.drain_due(self.clock) {
            tracing::debug!(?intent, at = ?self.clock, "hover toggle");
            // Stale timers toggle regardless of current state
            self.handle.toggle();
        }

        self.handle.sync();
        let expanded = self.handle.is_expanded();
        if expanded != self.observed {
            self.observed = expanded;
            self.size.set_expanded(expanded);
        }
        self.size.step(dt.as_secs_f32());
    }

    /// Size at rest for the current state. Pending hover toggles are
    /// reported by [`pending_hover`](Self::pending_hover).
    pub fn is_settled(&self) -> bool {
        self.observed == self.handle.is_expanded() && self.size.is_settled()
    }
}
