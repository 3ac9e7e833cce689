//! Animation error types

use thiserror::Error;

/// Errors raised while parsing animation configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Easing name is not one of the supported curves
    #[error("unknown easing curve: {0}")]
    UnknownEasing(String),

    /// Cubic bezier control points outside the valid x range
    #[error("invalid cubic-bezier({x1}, {y1}, {x2}, {y2}): x control points must lie in [0, 1]")]
    InvalidBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Preset name is not part of the preset catalog
    #[error("unknown animation preset: {0}")]
    UnknownPreset(String),
}

/// Result type for animation parsing
pub type Result<T> = std::result::Result<T, AnimationError>;
