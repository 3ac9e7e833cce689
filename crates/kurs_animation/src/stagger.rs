//! Stagger offsets for revealing a sequence of children

use serde::{Deserialize, Serialize};

/// Order in which children start their reveal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaggerDirection {
    /// Document order
    #[default]
    Forward,
    /// Last child first
    Reverse,
    /// Middle child first, spreading outward
    FromCenter,
}

/// Delay between consecutive children plus ordering
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stagger {
    /// Seconds between the start of consecutive children
    pub each: f32,
    pub direction: StaggerDirection,
    /// Children past this rank share the last delay
    pub limit: Option<usize>,
}

impl Default for Stagger {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Stagger {
    pub fn new(each: f32) -> Self {
        Self {
            each: each.max(0.0),
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Rank of child `index` among `total` children
    pub fn rank(&self, index: usize, total: usize) -> usize {
        let rank = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => index.abs_diff(total / 2),
        };
        match self.limit {
            Some(limit) => rank.min(limit),
            None => rank,
        }
    }

    /// Start delay of child `index` in seconds
    pub fn delay_for(&self, index: usize, total: usize) -> f32 {
        self.each * self.rank(index, total) as f32
    }
}
