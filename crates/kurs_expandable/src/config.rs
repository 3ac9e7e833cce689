//! Panel configuration
//!
//! Loaded from the `[panel]`, `[card]` and `[content]` tables of a TOML file.
//! Every field is optional; defaults match the stock course card.

use crate::descriptor::AnimationInput;
use crate::error::Result;
use crate::size::SizeSpec;
use kurs_animation::{Easing, SpringConfig, Stagger, StaggerDirection};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Axis along which a panel grows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandDirection {
    #[default]
    Vertical,
    Horizontal,
    Both,
}

impl ExpandDirection {
    pub fn animates_width(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    pub fn animates_height(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// How an expanding card affects its siblings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandBehavior {
    /// Card grows over its siblings; they keep the collapsed layout
    #[default]
    Replace,
    /// Card pushes its siblings aside
    Push,
}

/// Root panel settings shared by every part through context
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpandableConfig {
    #[serde(default)]
    pub initial_expanded: bool,

    #[serde(default)]
    pub expand_direction: ExpandDirection,

    #[serde(default)]
    pub expand_behavior: ExpandBehavior,

    /// Reveal duration in seconds
    #[serde(default = "default_transition_duration")]
    pub transition_duration: f32,

    #[serde(default)]
    pub ease: Easing,

    /// Seconds before size and reveal animations start after a flip
    #[serde(default)]
    pub initial_delay: f32,

    #[serde(default = "SpringConfig::expandable")]
    pub spring: SpringConfig,
}

fn default_transition_duration() -> f32 {
    0.3
}

impl Default for ExpandableConfig {
    fn default() -> Self {
        Self {
            initial_expanded: false,
            expand_direction: ExpandDirection::default(),
            expand_behavior: ExpandBehavior::default(),
            transition_duration: default_transition_duration(),
            ease: Easing::default(),
            initial_delay: 0.0,
            spring: SpringConfig::expandable(),
        }
    }
}

impl ExpandableConfig {
    pub fn transition(&self) -> TransitionSpec {
        TransitionSpec {
            duration: self.transition_duration.max(0.0),
            ease: self.ease,
            delay: self.initial_delay.max(0.0),
        }
    }
}

/// Tween timing for content reveal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSpec {
    pub duration: f32,
    pub ease: Easing,
    pub delay: f32,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        ExpandableConfig::default().transition()
    }
}

/// Card box sizes and hover behaviour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default = "default_collapsed_size")]
    pub collapsed_size: SizeSpec,

    #[serde(default = "default_expanded_size")]
    pub expanded_size: SizeSpec,

    #[serde(default)]
    pub hover_to_expand: bool,

    /// Milliseconds between hover-enter and the expand toggle
    #[serde(default)]
    pub expand_delay: u64,

    /// Milliseconds between hover-leave and the collapse toggle
    #[serde(default)]
    pub collapse_delay: u64,

    /// Drop a pending hover toggle when the pointer reverses direction
    #[serde(default)]
    pub cancel_stale_hover: bool,
}

fn default_collapsed_size() -> SizeSpec {
    SizeSpec::new(320.0, 211.0)
}

fn default_expanded_size() -> SizeSpec {
    SizeSpec::default().with_width(480.0)
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            collapsed_size: default_collapsed_size(),
            expanded_size: default_expanded_size(),
            hover_to_expand: false,
            expand_delay: 0,
            collapse_delay: 0,
            cancel_stale_hover: false,
        }
    }
}

impl CardConfig {
    pub fn expand_delay(&self) -> Duration {
        Duration::from_millis(self.expand_delay)
    }

    pub fn collapse_delay(&self) -> Duration {
        Duration::from_millis(self.collapse_delay)
    }
}

/// Revealed content settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Preset id such as `fade` or `slide-up`
    #[serde(default)]
    pub preset: Option<String>,

    #[serde(default)]
    pub animate_in: Option<AnimationInput>,

    #[serde(default)]
    pub animate_out: Option<AnimationInput>,

    #[serde(default)]
    pub keep_mounted: bool,

    /// Reveal children one after another
    #[serde(default)]
    pub stagger: bool,

    /// Seconds between consecutive children
    #[serde(default = "default_stagger_children")]
    pub stagger_children: f32,

    #[serde(default)]
    pub stagger_direction: StaggerDirection,

    #[serde(default)]
    pub stagger_limit: Option<usize>,
}

fn default_stagger_children() -> f32 {
    0.1
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            preset: None,
            animate_in: None,
            animate_out: None,
            keep_mounted: false,
            stagger: false,
            stagger_children: default_stagger_children(),
            stagger_direction: StaggerDirection::default(),
            stagger_limit: None,
        }
    }
}

impl ContentConfig {
    pub fn with_preset(mut self, id: impl Into<String>) -> Self {
        self.preset = Some(id.into());
        self
    }

    pub fn keep_mounted(mut self) -> Self {
        self.keep_mounted = true;
        self
    }

    pub fn staggered(mut self, each: f32) -> Self {
        self.stagger = true;
        self.stagger_children = each;
        self
    }

    /// Stagger settings, or `None` when children reveal together
    pub fn stagger(&self) -> Option<Stagger> {
        if !self.stagger {
            return None;
        }
        let stagger = Stagger {
            direction: self.stagger_direction,
            limit: self.stagger_limit,
            ..Stagger::new(self.stagger_children)
        };
        Some(stagger)
    }
}

/// A full panel: root, card and content settings
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub panel: ExpandableConfig,
    #[serde(default)]
    pub card: CardConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

impl PanelConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurs_animation::VisualTarget;

    #[test]
    fn test_empty_config_uses_card_defaults() {
        let config = PanelConfig::from_toml_str("").unwrap();
        assert_eq!(config.card.collapsed_size, SizeSpec::new(320.0, 211.0));
        assert_eq!(config.card.expanded_size.width, Some(480.0));
        assert_eq!(config.card.expanded_size.height, None);
        assert_eq!(config.panel.transition_duration, 0.3);
        assert_eq!(config.panel.ease, Easing::EaseInOut);
        assert_eq!(config.panel.expand_direction, ExpandDirection::Vertical);
        assert_eq!(config.panel.expand_behavior, ExpandBehavior::Replace);
        assert_eq!(config.panel.spring, SpringConfig::expandable());
        assert_eq!(config.content.stagger_children, 0.1);
        assert!(config.content.stagger().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = PanelConfig::from_toml_str(
            r#"
            [panel]
            expand_direction = "both"
            expand_behavior = "push"
            transition_duration = 0.5
            ease = [0.25, 0.1, 0.25, 1.0]
            initial_delay = 0.1

            [card]
            collapsed_size = { width = 480, height = 260 }
            expanded_size = { width = 480, height = 520 }
            hover_to_expand = true
            expand_delay = 500

            [content]
            preset = "slide-up"
            stagger = true
            stagger_children = 0.05
            stagger_direction = "reverse"

            [content.animate_out]
            kind = "targets"
            exit = { opacity = 0.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.panel.expand_direction, ExpandDirection::Both);
        assert_eq!(config.panel.expand_behavior, ExpandBehavior::Push);
        assert_eq!(config.panel.ease.control_points(), [0.25, 0.1, 0.25, 1.0]);
        assert_eq!(config.card.expanded_size, SizeSpec::new(480.0, 520.0));
        assert_eq!(config.card.expand_delay(), Duration::from_millis(500));
        assert_eq!(config.content.preset.as_deref(), Some("slide-up"));

        let stagger = config.content.stagger().unwrap();
        assert_eq!(stagger.each, 0.05);
        assert_eq!(stagger.direction, StaggerDirection::Reverse);

        let Some(AnimationInput::Targets(out)) = &config.content.animate_out else {
            panic!("expected explicit targets");
        };
        assert_eq!(out.exit, Some(VisualTarget::opacity(0.0)));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let err = PanelConfig::from_toml_str("[panel]\nexpand_direction = \"sideways\"").unwrap_err();
        assert!(err.to_string().contains("invalid panel config"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = PanelConfig::default();
        config.content = ContentConfig::default().with_preset("fade").staggered(0.2);

        let text = config.to_toml_string().unwrap();
        assert_eq!(PanelConfig::from_toml_str(&text).unwrap(), config);
    }
}
