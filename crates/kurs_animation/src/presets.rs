//! Named enter/exit presets for revealed content

use crate::error::AnimationError;
use crate::target::{TargetTriple, VisualTarget};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Slide distance used by the slide presets (pixels)
const SLIDE_DISTANCE: f32 = 20.0;

/// Built-in content animation presets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentPreset {
    Fade,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    Scale,
    Rotate,
    BlurSm,
    BlurMd,
    BlurLg,
}

impl ContentPreset {
    /// Stable preset id used in config files
    pub fn id(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::BlurSm => "blur-sm",
            Self::BlurMd => "blur-md",
            Self::BlurLg => "blur-lg",
        }
    }

    /// Full preset list
    pub fn all() -> &'static [ContentPreset] {
        const PRESETS: [ContentPreset; 10] = [
            ContentPreset::Fade,
            ContentPreset::SlideUp,
            ContentPreset::SlideDown,
            ContentPreset::SlideLeft,
            ContentPreset::SlideRight,
            ContentPreset::Scale,
            ContentPreset::Rotate,
            ContentPreset::BlurSm,
            ContentPreset::BlurMd,
            ContentPreset::BlurLg,
        ];
        &PRESETS
    }

    /// Look a preset up by id. Unknown ids are logged and yield `None`.
    pub fn lookup(id: &str) -> Option<Self> {
        match id.parse() {
            Ok(preset) => Some(preset),
            Err(err) => {
                tracing::warn!("{err}; content will not animate");
                None
            }
        }
    }

    /// The (initial, animate, exit) targets of this preset
    pub fn targets(self) -> TargetTriple {
        let hidden = VisualTarget::opacity(0.0);
        let shown = VisualTarget::opacity(1.0);

        let (hidden, shown) = match self {
            Self::Fade => (hidden, shown),
            Self::SlideUp => (hidden.with_y(SLIDE_DISTANCE), shown.with_y(0.0)),
            Self::SlideDown => (hidden.with_y(-SLIDE_DISTANCE), shown.with_y(0.0)),
            Self::SlideLeft => (hidden.with_x(SLIDE_DISTANCE), shown.with_x(0.0)),
            Self::SlideRight => (hidden.with_x(-SLIDE_DISTANCE), shown.with_x(0.0)),
            Self::Scale => (hidden.with_scale(0.8), shown.with_scale(1.0)),
            Self::Rotate => (hidden.with_rotate(-10.0), shown.with_rotate(0.0)),
            Self::BlurSm => (hidden.with_blur(4.0), shown.with_blur(0.0)),
            Self::BlurMd => (hidden.with_blur(8.0), shown.with_blur(0.0)),
            Self::BlurLg => (hidden.with_blur(16.0), shown.with_blur(0.0)),
        };

        // Every preset exits the way it entered
        TargetTriple::new(hidden, shown, hidden)
    }
}

impl FromStr for ContentPreset {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentPreset::all()
            .iter()
            .copied()
            .find(|p| p.id() == s)
            .ok_or_else(|| AnimationError::UnknownPreset(s.to_string()))
    }
}

impl Display for ContentPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
