//! Visual property targets
//!
//! A [`VisualTarget`] is a sparse set of visual properties an element animates
//! toward. Unset properties are left alone by the animation.

use serde::{Deserialize, Serialize};

/// Sparse visual properties of an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualTarget {
    /// Opacity (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Horizontal offset in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Vertical offset in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Uniform scale factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    /// Gaussian blur radius in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
}

impl VisualTarget {
    /// The identity target: no property is animated
    pub const IDENTITY: VisualTarget = VisualTarget {
        opacity: None,
        x: None,
        y: None,
        scale: None,
        rotate: None,
        blur: None,
    };

    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Self::IDENTITY
        }
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_x(mut self, px: f32) -> Self {
        self.x = Some(px);
        self
    }

    pub fn with_y(mut self, px: f32) -> Self {
        self.y = Some(px);
        self
    }

    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    /// True when no property is set
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Interpolate toward `other`; a property set on one side only holds that value
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            x: lerp_opt(self.x, other.x, t),
            y: lerp_opt(self.y, other.y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            rotate: lerp_opt(self.rotate, other.rotate, t),
            blur: lerp_opt(self.blur, other.blur, t),
        }
    }

    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn resolved_offset(&self) -> (f32, f32) {
        (self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    pub fn resolved_rotate(&self) -> f32 {
        self.rotate.unwrap_or(0.0)
    }

    pub fn resolved_blur(&self) -> f32 {
        self.blur.unwrap_or(0.0)
    }
}

fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Targets for the three presence phases of an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetTriple {
    /// Where a freshly mounted element starts
    pub initial: VisualTarget,
    /// Where it rests while present
    pub animate: VisualTarget,
    /// Where it goes before being removed
    pub exit: VisualTarget,
}

impl TargetTriple {
    pub const IDENTITY: TargetTriple = TargetTriple {
        initial: VisualTarget::IDENTITY,
        animate: VisualTarget::IDENTITY,
        exit: VisualTarget::IDENTITY,
    };

    pub fn new(initial: VisualTarget, animate: VisualTarget, exit: VisualTarget) -> Self {
        Self {
            initial,
            animate,
            exit,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_partial_properties() {
        let from = VisualTarget::opacity(0.0).with_y(20.0);
        let to = VisualTarget::opacity(1.0).with_y(0.0).with_scale(1.0);

        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.y, Some(10.0));
        // Only one side sets scale
        assert_eq!(mid.scale, Some(1.0));
        assert_eq!(mid.x, None);
    }

    #[test]
    fn test_resolved_defaults() {
        let t = VisualTarget::IDENTITY;
        assert!(t.is_identity());
        assert_eq!(t.resolved_opacity(), 1.0);
        assert_eq!(t.resolved_scale(), 1.0);
        assert_eq!(t.resolved_offset(), (0.0, 0.0));
        assert_eq!(t.resolved_blur(), 0.0);
    }

    #[test]
    fn test_deserialize_sparse_target() {
        let t: VisualTarget = serde_json::from_str(r#"{"opacity": 0, "y": 20}"#).unwrap();
        assert_eq!(t, VisualTarget::opacity(0.0).with_y(20.0));
    }
}
