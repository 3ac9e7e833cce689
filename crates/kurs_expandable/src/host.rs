//! Frame host for many panels

use crate::panel::{ExpandablePanel, PanelBuilder};
use kurs_animation::{AnimationId, AnimationScheduler};
use kurs_core::context::ContextScope;
use std::rc::Rc;
use std::time::Duration;

/// Owns a set of independent panels and steps the moving ones each frame
#[derive(Debug)]
pub struct PanelHost {
    scope: Rc<ContextScope>,
    scheduler: AnimationScheduler<ExpandablePanel>,
}

impl PanelHost {
    pub fn new() -> Self {
        Self {
            scope: ContextScope::root(),
            scheduler: AnimationScheduler::new(),
        }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.scheduler.set_target_fps(fps);
        self
    }

    /// Scope every panel is built under
    pub fn scope(&self) -> &Rc<ContextScope> {
        &self.scope
    }

    pub fn add(&mut self, builder: &PanelBuilder) -> AnimationId {
        let panel = builder.build(&self.scope);
        self.scheduler.add(panel)
    }

    pub fn panel(&self, id: AnimationId) -> Option<&ExpandablePanel> {
        self.scheduler.get(id)
    }

    pub fn panel_mut(&mut self, id: AnimationId) -> Option<&mut ExpandablePanel> {
        self.scheduler.get_mut(id)
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<ExpandablePanel> {
        self.scheduler.remove(id)
    }

    pub fn panels(&self) -> impl Iterator<Item = (AnimationId, &ExpandablePanel)> {
        self.scheduler.iter()
    }

    pub fn frame_interval(&self) -> Duration {
        self.scheduler.frame_interval()
    }

    /// Step one frame at the target rate
    pub fn frame(&mut self) {
        let dt = self.frame_interval().as_secs_f32();
        self.scheduler.tick(dt);
    }

    /// Whether another frame is needed
    pub fn has_active_animations(&self) -> bool {
        self.scheduler.has_active_animations()
    }

    pub fn frame_count(&self) -> u64 {
        self.scheduler.frame_count()
    }

    /// Step frames until everything rests or `max_frames` pass; returns frames run
    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.has_active_animations() {
            self.frame();
            frames += 1;
        }
        frames
    }

    pub fn len(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduler.is_empty()
    }
}

impl Default for PanelHost {
    fn default() -> Self {
        Self::new()
    }
}
