//! Kurs Animation System
//!
//! Frame-driven animation primitives used by the expandable panels.
//!
//! # Features
//!
//! - **Springs**: RK4-integrated springs that retarget without restarting
//! - **Easing**: CSS-compatible cubic-bezier curves
//! - **Presets**: named enter/exit target triples for revealed content
//! - **Stagger & Timelines**: offset tweens for sequential child reveal
//! - **Timers**: virtual-clock delayed actions
//! - **Scheduler**: steps animations until everything is at rest

pub mod easing;
pub mod error;
pub mod presets;
pub mod scheduler;
pub mod spring;
pub mod stagger;
pub mod target;
pub mod timeline;
pub mod timer;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use presets::ContentPreset;
pub use scheduler::{Animated, AnimationId, AnimationScheduler};
pub use spring::{Spring, SpringConfig};
pub use stagger::{Stagger, StaggerDirection};
pub use target::{TargetTriple, VisualTarget};
pub use timeline::{Timeline, TimelineEntryId};
pub use timer::{TimerId, TimerQueue};
