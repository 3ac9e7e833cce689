//! Frame scheduler
//!
//! Owns a set of animated objects and steps the unsettled ones each frame.
//! Hosts stop requesting frames once [`AnimationScheduler::has_active_animations`]
//! reports false.

use slotmap::{new_key_type, SlotMap};
use std::time::Duration;

new_key_type! {
    pub struct AnimationId;
}

/// Anything that advances with frame time and eventually comes to rest
pub trait Animated {
    /// Advance by `dt` seconds
    fn step(&mut self, dt: f32);

    /// True when stepping would not change anything
    fn is_settled(&self) -> bool;
}

/// Steps every registered animation each frame
#[derive(Debug)]
pub struct AnimationScheduler<T> {
    animations: SlotMap<AnimationId, T>,
    target_fps: u32,
    frames: u64,
}

impl<T: Animated> AnimationScheduler<T> {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            target_fps: 60,
            frames: 0,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Frame interval at the target rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }

    pub fn add(&mut self, animation: T) -> AnimationId {
        self.animations.insert(animation)
    }

    pub fn get(&self, id: AnimationId) -> Option<&T> {
        self.animations.get(id)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut T> {
        self.animations.get_mut(id)
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<T> {
        self.animations.remove(id)
    }

    /// Step every unsettled animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.frames += 1;
        let mut stepped = 0usize;
        for (_, animation) in self.animations.iter_mut() {
            if !animation.is_settled() {
                animation.step(dt);
                stepped += 1;
            }
        }
        tracing::trace!(frame = self.frames, stepped, "scheduler tick");
    }

    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| !a.is_settled())
    }

    /// Frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &T)> {
        self.animations.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AnimationId, &mut T)> {
        self.animations.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl<T: Animated> Default for AnimationScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
