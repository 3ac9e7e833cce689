//! Kurs Expandable Panels
//!
//! Headless expand/collapse panels: a card that springs between two sizes and
//! content that mounts, animates in, animates out and unmounts as the panel
//! flips. The host feeds in measured sizes, pointer events and frame time, and
//! reads back sizes, visual targets and mount state.
//!
//! # Structure
//!
//! - [`Expandable`] owns the expanded flag and provides an [`ExpandableHandle`]
//!   through a [`ContextScope`](kurs_core::ContextScope)
//! - [`ExpandableTrigger`], [`ExpandableCard`] and [`ExpandableContent`] find
//!   that handle from any descendant scope
//! - [`ExpandablePanel`] bundles one of each and fires end hooks
//! - [`PanelHost`] steps many panels until they all rest
//!
//! # Example
//!
//! ```rust
//! use kurs_core::ContextScope;
//! use kurs_expandable::{PanelBuilder, PanelConfig, Size};
//! use std::time::Duration;
//!
//! let mut panel = PanelBuilder::new(PanelConfig::default()).build(&ContextScope::root());
//! panel.measure_card(Size::new(320.0, 480.0));
//! panel.click();
//!
//! while !panel.is_settled() {
//!     panel.tick(Duration::from_millis(16));
//! }
//! assert_eq!(panel.card().size().height, 480.0);
//! ```

pub mod card;
pub mod config;
pub mod content;
pub mod context;
pub mod controller;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod panel;
pub mod reveal;
pub mod root;
pub mod size;

pub use card::ExpandableCard;
pub use config::{
    CardConfig, ContentConfig, ExpandBehavior, ExpandDirection, ExpandableConfig, PanelConfig,
    TransitionSpec,
};
pub use content::ExpandableContent;
pub use context::{use_expandable, ExpandableHandle, PanelSettings};
pub use controller::{
    ExpansionController, ExpansionEvent, ExpansionPhase, ExpansionState, Hook, LifecycleHooks,
};
pub use descriptor::{resolve, AnimationInput, ResolvedAnimation, TargetInput, VariantLabels};
pub use error::{ExpandableError, Result};
pub use host::PanelHost;
pub use panel::{ContentFrame, ExpandablePanel, PanelBuilder, PanelFrame};
pub use reveal::{ContentRevealAnimator, Presence};
pub use root::{Expandable, ExpandableTrigger};
pub use size::{Size, SizeAnimator, SizeSpec};
