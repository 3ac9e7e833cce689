//! Content animation descriptors
//!
//! Content can be described three ways: a named preset, an explicit
//! (initial, animate, exit) triple, or a variant map of named states. This
//! module turns whatever was supplied into a [`ResolvedAnimation`].
//!
//! Resolution order is variant map, then explicit triple, then preset, then
//! identity.

use indexmap::IndexMap;
use kurs_animation::{ContentPreset, TargetTriple, VisualTarget};
use serde::{Deserialize, Serialize};

/// Label used for the initial state when a variant map has it
pub const HIDDEN: &str = "hidden";
/// Label used for the resting state when a variant map has it
pub const VISIBLE: &str = "visible";
/// Label used for the exit state when a variant map has it
pub const EXIT: &str = "exit";

/// Explicit per-phase targets; unset phases fall back to the preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<VisualTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<VisualTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<VisualTarget>,
}

/// A caller-supplied `animate_in` / `animate_out` value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnimationInput {
    Targets(TargetInput),
    Variants {
        variants: IndexMap<String, VisualTarget>,
    },
}

impl AnimationInput {
    pub fn targets(input: TargetInput) -> Self {
        Self::Targets(input)
    }

    /// Build a variant map, keeping the given label order
    pub fn variants<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, VisualTarget)>,
        K: Into<String>,
    {
        Self::Variants {
            variants: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    fn initial(&self) -> Option<VisualTarget> {
        match self {
            Self::Targets(t) => t.initial,
            Self::Variants { variants } => variants.get(HIDDEN).copied(),
        }
    }

    fn animate(&self) -> Option<VisualTarget> {
        match self {
            Self::Targets(t) => t.animate,
            Self::Variants { variants } => variants.get(VISIBLE).copied(),
        }
    }

    fn exit(&self) -> Option<VisualTarget> {
        match self {
            Self::Targets(t) => t.exit,
            Self::Variants { variants } => variants.get(EXIT).copied(),
        }
    }
}

/// Labels picked from a variant map for each presence phase
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantLabels {
    pub initial: String,
    pub animate: String,
    pub exit: String,
}

impl VariantLabels {
    /// Pick labels from map keys in insertion order
    pub fn select<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let keys: Vec<&str> = keys.into_iter().collect();
        let has = |label: &str| keys.contains(&label);

        let initial = if has(HIDDEN) {
            HIDDEN
        } else {
            keys.first().copied().unwrap_or(HIDDEN)
        };
        let animate = if has(VISIBLE) {
            VISIBLE
        } else {
            keys.get(1).or(keys.first()).copied().unwrap_or(VISIBLE)
        };
        let exit = if has(EXIT) {
            EXIT
        } else if has(HIDDEN) {
            HIDDEN
        } else {
            keys.first().copied().unwrap_or(EXIT)
        };

        Self {
            initial: initial.to_string(),
            animate: animate.to_string(),
            exit: exit.to_string(),
        }
    }
}

/// The animation a content block will actually play
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedAnimation {
    Triple(TargetTriple),
    Variants {
        variants: IndexMap<String, VisualTarget>,
        labels: VariantLabels,
    },
}

impl ResolvedAnimation {
    /// Concrete targets per phase; missing variant labels are identity
    pub fn targets(&self) -> TargetTriple {
        match self {
            Self::Triple(triple) => *triple,
            Self::Variants { variants, labels } => {
                let pick = |label: &str| variants.get(label).copied().unwrap_or_default();
                TargetTriple::new(
                    pick(&labels.initial),
                    pick(&labels.animate),
                    pick(&labels.exit),
                )
            }
        }
    }

    pub fn is_identity(&self) -> bool {
        self.targets().is_identity()
    }
}

/// Resolve the content animation from its three optional sources
pub fn resolve(
    preset: Option<ContentPreset>,
    animate_in: Option<&AnimationInput>,
    animate_out: Option<&AnimationInput>,
) -> ResolvedAnimation {
    if let Some(AnimationInput::Variants { variants }) = animate_in {
        let labels = VariantLabels::select(variants.keys().map(String::as_str));
        return ResolvedAnimation::Variants {
            variants: variants.clone(),
            labels,
        };
    }

    let base = preset.map(ContentPreset::targets).unwrap_or_default();
    let initial = animate_in.and_then(AnimationInput::initial);
    let animate = animate_in.and_then(AnimationInput::animate);
    let exit = animate_out.and_then(AnimationInput::exit);

    ResolvedAnimation::Triple(TargetTriple::new(
        initial.unwrap_or(base.initial),
        animate.unwrap_or(base.animate),
        exit.unwrap_or(base.exit),
    ))
}
