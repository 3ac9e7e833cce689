//! Revealed content of a panel

use crate::config::{ContentConfig, ExpandDirection};
use crate::context::{use_expandable, ExpandableHandle};
use crate::descriptor::{resolve, ResolvedAnimation};
use crate::reveal::{ContentRevealAnimator, Presence};
use crate::size::{Size, SizeAnimator, SizeSpec};
use kurs_animation::{ContentPreset, VisualTarget};
use kurs_core::context::ContextScope;
use std::time::Duration;

/// Content that appears while its panel is expanded.
///
/// Its container height springs between 0 and the measured content height;
/// the content itself plays its enter/exit animation independently.
#[derive(Debug)]
pub struct ExpandableContent {
    handle: ExpandableHandle,
    height: SizeAnimator,
    reveal: ContentRevealAnimator,
    observed: bool,
}

impl ExpandableContent {
    pub fn new(scope: &ContextScope, config: &ContentConfig) -> Self {
        let handle = use_expandable(scope);
        let settings = handle.settings();
        let expanded = handle.is_expanded();

        let animation = resolved_animation(config);

        let height = SizeAnimator::new(
            SizeSpec::default().with_height(0.0),
            SizeSpec::default(),
            ExpandDirection::Vertical,
            settings.spring,
            expanded,
        )
        .with_delay(settings.transition.delay);

        let reveal =
            ContentRevealAnimator::new(&animation, settings.transition, config.keep_mounted, expanded)
                .with_stagger(config.stagger());

        Self {
            handle,
            height,
            reveal,
            observed: expanded,
        }
    }

    /// Number of children taking part in a staggered reveal
    pub fn with_children(mut self, count: usize) -> Self {
        self.reveal.set_child_count(count);
        self
    }

    pub fn set_child_count(&mut self, count: usize) {
        self.reveal.set_child_count(count);
    }

    /// Report the natural size of the content
    pub fn measure(&mut self, natural: Size) {
        self.height.measure(natural);
    }

    /// Container height this frame
    pub fn height(&self) -> f32 {
        self.height.size().height
    }

    pub fn presence(&self) -> Presence {
        self.reveal.presence()
    }

    pub fn is_mounted(&self) -> bool {
        self.reveal.is_mounted()
    }

    /// Visual properties of the content this frame
    pub fn visual(&self) -> VisualTarget {
        self.reveal.current()
    }

    pub fn child_visual(&self, index: usize) -> VisualTarget {
        self.reveal.child_target(index)
    }

    pub fn child_visuals(&self) -> Vec<VisualTarget> {
        self.reveal.child_targets()
    }

    pub fn child_delay(&self, index: usize) -> Option<f32> {
        self.reveal.child_delay(index)
    }

    pub fn reveal(&self) -> &ContentRevealAnimator {
        &self.reveal
    }

    pub fn tick(&mut self, dt: Duration) {
        self.handle.sync();
        let expanded = self.handle.is_expanded();
        if expanded != self.observed {
            self.observed = expanded;
            self.height.set_expanded(expanded);
            self.reveal.set_expanded(expanded);
        }

        let dt = dt.as_secs_f32();
        self.height.step(dt);
        self.reveal.step(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.observed == self.handle.is_expanded()
            && self.height.is_settled()
            && self.reveal.is_settled()
    }
}

/// The resolved animation a content config would play
pub fn resolved_animation(config: &ContentConfig) -> ResolvedAnimation {
    let preset = config.preset.as_deref().and_then(ContentPreset::lookup);
    resolve(preset, config.animate_in.as_ref(), config.animate_out.as_ref())
}
