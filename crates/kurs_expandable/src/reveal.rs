//! Enter/exit animation and mount policy for revealed content
//!
//! Content is present while its panel is expanded, or always with
//! `keep_mounted`. Collapsing plays the exit animation first and only then
//! removes the content. Children may reveal one after another.

use crate::config::TransitionSpec;
use crate::descriptor::ResolvedAnimation;
use kurs_animation::{Animated, Stagger, TargetTriple, Timeline, TimelineEntryId, VisualTarget};

/// Mount state of a content block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Not in the tree
    Unmounted,
    /// Playing initial → animate
    Entering,
    /// Resting at the animate target
    Present,
    /// Playing toward the exit target; still in the tree
    Exiting,
    /// Kept mounted while collapsed, resting at the exit target
    Hidden,
}

impl Presence {
    pub fn is_mounted(self) -> bool {
        self != Self::Unmounted
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

/// Per-child enter targets used by staggered reveal
fn child_hidden() -> VisualTarget {
    VisualTarget::opacity(0.0).with_y(20.0)
}

fn child_visible() -> VisualTarget {
    VisualTarget::opacity(1.0).with_y(0.0)
}

#[derive(Clone, Debug)]
pub struct ContentRevealAnimator {
    targets: TargetTriple,
    transition: TransitionSpec,
    keep_mounted: bool,
    stagger: Option<Stagger>,
    child_count: usize,

    presence: Presence,
    from: VisualTarget,
    to: VisualTarget,
    current: VisualTarget,

    timeline: Timeline,
    main: Option<TimelineEntryId>,
    children: Vec<TimelineEntryId>,
    /// Children have played their reveal since the last mount
    children_revealed: bool,
}

impl ContentRevealAnimator {
    /// Create content for a panel that is `expanded` right now.
    ///
    /// Nothing animates on creation: expanded content starts at its animate
    /// target, kept-mounted collapsed content at its exit target.
    pub fn new(
        animation: &ResolvedAnimation,
        transition: TransitionSpec,
        keep_mounted: bool,
        expanded: bool,
    ) -> Self {
        let targets = animation.targets();
        let (presence, current) = if expanded {
            (Presence::Present, targets.animate)
        } else if keep_mounted {
            (Presence::Hidden, targets.exit)
        } else {
            (Presence::Unmounted, targets.initial)
        };

        Self {
            targets,
            transition,
            keep_mounted,
            stagger: None,
            child_count: 0,
            presence,
            from: current,
            to: current,
            current,
            timeline: Timeline::new(),
            main: None,
            children: Vec::new(),
            children_revealed: expanded,
        }
    }

    /// Reveal children one after another
    pub fn with_stagger(mut self, stagger: Option<Stagger>) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_children(mut self, count: usize) -> Self {
        self.child_count = count;
        self
    }

    pub fn set_child_count(&mut self, count: usize) {
        self.child_count = count;
    }

    pub fn child_count(&self) -> usize {
        self.child_count
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_mounted(&self) -> bool {
        self.presence.is_mounted()
    }

    pub fn targets(&self) -> &TargetTriple {
        &self.targets
    }

    /// Visual properties of the content block this frame
    pub fn current(&self) -> VisualTarget {
        self.current
    }

    /// React to a flip of the expanded flag
    pub fn set_expanded(&mut self, expanded: bool) {
        match (expanded, self.presence) {
            (true, Presence::Unmounted) => {
                self.children_revealed = false;
                self.begin(Presence::Entering, self.targets.initial, self.targets.animate);
            }
            (true, Presence::Exiting | Presence::Hidden) => {
                self.begin(Presence::Entering, self.current, self.targets.animate);
            }
            (false, Presence::Entering | Presence::Present) => {
                self.begin(Presence::Exiting, self.current, self.targets.exit);
            }
            _ => {}
        }
    }

    fn begin(&mut self, presence: Presence, from: VisualTarget, to: VisualTarget) {
        tracing::trace!(?presence, "content transition");
        self.presence = presence;
        self.from = from;
        self.to = to;
        self.current = from;

        let delay = self.transition.delay;
        let (duration, ease) = (self.transition.duration, self.transition.ease);

        self.timeline.clear();
        self.children.clear();
        self.main = Some(self.timeline.add(delay, duration, ease));

        if presence == Presence::Entering && !self.children_revealed {
            if let Some(stagger) = self.stagger {
                let total = self.child_count;
                self.children = (0..total)
                    .map(|i| {
                        self.timeline
                            .add(delay + stagger.delay_for(i, total), duration, ease)
                    })
                    .collect();
            }
        }

        self.timeline.start();
        if from == to && self.children.is_empty() {
            self.timeline.finish();
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.current = self.to;
        self.presence = match self.presence {
            Presence::Entering => {
                self.children_revealed = true;
                Presence::Present
            }
            Presence::Exiting if self.keep_mounted => Presence::Hidden,
            Presence::Exiting => {
                self.children_revealed = false;
                Presence::Unmounted
            }
            other => other,
        };
        self.children.clear();
        tracing::trace!(presence = ?self.presence, "content settled");
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if !self.timeline.is_playing() {
            return;
        }
        self.timeline.tick(dt);

        let progress = self
            .main
            .and_then(|id| self.timeline.progress(id))
            .unwrap_or(1.0);
        self.current = self.from.lerp(&self.to, progress);

        if !self.timeline.is_playing() {
            self.complete();
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.presence.is_transitioning()
    }

    /// Start delay of child `index`, or `None` when children are not staggered
    pub fn child_delay(&self, index: usize) -> Option<f32> {
        self.stagger
            .map(|s| self.transition.delay + s.delay_for(index, self.child_count))
    }

    /// Visual properties of child `index` this frame
    pub fn child_target(&self, index: usize) -> VisualTarget {
        if self.stagger.is_none() {
            return VisualTarget::IDENTITY;
        }
        if let Some(progress) = self
            .children
            .get(index)
            .and_then(|&id| self.timeline.progress(id))
        {
            return child_hidden().lerp(&child_visible(), progress);
        }
        if self.children_revealed {
            child_visible()
        } else {
            child_hidden()
        }
    }

    /// Targets of every child this frame
    pub fn child_targets(&self) -> Vec<VisualTarget> {
        (0..self.child_count).map(|i| self.child_target(i)).collect()
    }

    /// Whether child `index` has begun its reveal
    pub fn child_started(&self, index: usize) -> bool {
        match self.children.get(index) {
            Some(&id) => self.timeline.has_started(id),
            None => self.children_revealed,
        }
    }
}

impl Animated for ContentRevealAnimator {
    fn step(&mut self, dt: f32) {
        ContentRevealAnimator::step(self, dt);
    }

    fn is_settled(&self) -> bool {
        ContentRevealAnimator::is_settled(self)
    }
}
