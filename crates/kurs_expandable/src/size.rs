//! Spring-animated box size
//!
//! [`SizeAnimator`] turns the expanded flag, two [`SizeSpec`]s and the measured
//! natural size into a rendered size. Width and height run on independent
//! springs; the expand direction decides which of them move.

use crate::config::ExpandDirection;
use kurs_animation::{Animated, Spring, SpringConfig};
use serde::{Deserialize, Serialize};

/// A box size in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Requested size for one state; unset fields follow the measured size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl SizeSpec {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Fill unset fields from `measured`
    pub fn resolve(&self, measured: Size) -> Size {
        Size {
            width: self.width.unwrap_or(measured.width),
            height: self.height.unwrap_or(measured.height),
        }
    }
}

/// Animated size of one box
#[derive(Clone, Debug)]
pub struct SizeAnimator {
    collapsed: SizeSpec,
    expanded: SizeSpec,
    direction: ExpandDirection,
    measured: Size,
    has_measurement: bool,
    is_expanded: bool,
    width: Spring,
    height: Spring,
    delay: f32,
    /// Seconds left before a flip reaches the springs
    pending_delay: Option<f32>,
}

impl SizeAnimator {
    /// Create an animator resting at the size for `expanded`
    pub fn new(
        collapsed: SizeSpec,
        expanded: SizeSpec,
        direction: ExpandDirection,
        spring: SpringConfig,
        is_expanded: bool,
    ) -> Self {
        let start = if is_expanded { expanded } else { collapsed }.resolve(Size::ZERO);
        Self {
            collapsed,
            expanded,
            direction,
            measured: Size::ZERO,
            has_measurement: false,
            is_expanded,
            width: Spring::new(spring, start.width),
            height: Spring::new(spring, start.height),
            delay: 0.0,
            pending_delay: None,
        }
    }

    /// Hold each flip for `seconds` before the springs react
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    /// Report the natural size of the box's content.
    ///
    /// The first measurement places a resting box without animating.
    pub fn measure(&mut self, natural: Size) {
        let first = !self.has_measurement;
        self.has_measurement = true;
        if natural == self.measured && !first {
            return;
        }
        self.measured = natural;

        if first && self.is_settled() {
            let target = self.target();
            self.width.jump_to(target.width);
            self.height.jump_to(target.height);
        } else if self.pending_delay.is_none() {
            self.retarget();
        }
    }

    pub fn measured(&self) -> Size {
        self.measured
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// React to a flip of the expanded flag
    pub fn set_expanded(&mut self, expanded: bool) {
        if expanded == self.is_expanded {
            return;
        }
        self.is_expanded = expanded;
        if self.delay > 0.0 {
            self.pending_delay = Some(self.delay);
        } else {
            self.pending_delay = None;
            self.retarget();
        }
    }

    /// Size the springs are heading to
    pub fn target(&self) -> Size {
        self.spec().resolve(self.measured)
    }

    /// Size for the collapsed state at the current measurement
    pub fn collapsed_size(&self) -> Size {
        self.collapsed.resolve(self.measured)
    }

    /// Rendered size this frame
    pub fn size(&self) -> Size {
        let frozen = self.collapsed_size();
        Size {
            width: if self.direction.animates_width() {
                self.width.value()
            } else {
                frozen.width
            },
            height: if self.direction.animates_height() {
                self.height.value()
            } else {
                frozen.height
            },
        }
    }

    pub fn direction(&self) -> ExpandDirection {
        self.direction
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let mut dt = dt;
        if let Some(remaining) = self.pending_delay {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                self.pending_delay = Some(remaining);
                return;
            }
            self.pending_delay = None;
            self.retarget();
            dt = -remaining;
        }

        if self.direction.animates_width() {
            self.width.step(dt);
        }
        if self.direction.animates_height() {
            self.height.step(dt);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.pending_delay.is_none()
            && (!self.direction.animates_width() || self.width.is_settled())
            && (!self.direction.animates_height() || self.height.is_settled())
    }

    fn spec(&self) -> SizeSpec {
        if self.is_expanded {
            self.expanded
        } else {
            self.collapsed
        }
    }

    fn retarget(&mut self) {
        let target = self.target();
        tracing::trace!(
            expanded = self.is_expanded,
            width = target.width,
            height = target.height,
            "size retarget"
        );
        if self.direction.animates_width() {
            self.width.set_target(target.width);
        }
        if self.direction.animates_height() {
            self.height.set_target(target.height);
        }
    }
}

impl Animated for SizeAnimator {
    fn step(&mut self, dt: f32) {
        SizeAnimator::step(self, dt);
    }

    fn is_settled(&self) -> bool {
        SizeAnimator::is_settled(self)
    }
}
