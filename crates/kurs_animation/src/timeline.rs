//! Timeline of offset, eased tweens
//!
//! Each entry is a 0..1 progress curve that starts `offset` seconds into the
//! timeline and runs for `duration` seconds. Callers map progress onto their
//! own values.

use crate::easing::Easing;
use crate::scheduler::Animated;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimelineEntryId;
}

#[derive(Clone, Copy, Debug)]
struct TimelineEntry {
    offset: f32,
    duration: f32,
    easing: Easing,
}

/// A set of tweens sharing one clock
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    elapsed: f32,
    end: f32,
    playing: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween starting `offset` seconds in
    pub fn add(&mut self, offset: f32, duration: f32, easing: Easing) -> TimelineEntryId {
        let offset = offset.max(0.0);
        let duration = duration.max(0.0);
        self.end = self.end.max(offset + duration);
        self.entries.insert(TimelineEntry {
            offset,
            duration,
            easing,
        })
    }

    /// Drop every entry and rewind
    pub fn clear(&mut self) {
        self.entries.clear();
        self.elapsed = 0.0;
        self.end = 0.0;
        self.playing = false;
    }

    /// Rewind to zero and play
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Seconds since `start`
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time at which the last entry completes
    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance by `dt` seconds; stops once every entry has completed
    pub fn tick(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.end {
            self.elapsed = self.end;
            self.playing = false;
        }
    }

    /// Jump to the end of every entry
    pub fn finish(&mut self) {
        self.elapsed = self.end;
        self.playing = false;
    }

    /// Eased progress (0.0 to 1.0) of an entry at the current time
    pub fn progress(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        let local = self.elapsed - entry.offset;

        if entry.duration <= 0.0 {
            // Instant entries jump once their offset is reached
            return Some(if local < 0.0 { 0.0 } else { 1.0 });
        }
        if local <= 0.0 {
            return Some(0.0);
        }
        if local >= entry.duration {
            return Some(1.0);
        }

        Some(entry.easing.apply(local / entry.duration))
    }

    /// Whether an entry has begun moving
    pub fn has_started(&self, id: TimelineEntryId) -> bool {
        self.entries
            .get(id)
            .map(|e| self.elapsed > e.offset)
            .unwrap_or(false)
    }
}

impl Animated for Timeline {
    fn step(&mut self, dt: f32) {
        self.tick(dt);
    }

    fn is_settled(&self) -> bool {
        !self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_entry_progress() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0.0, 1.0, Easing::Linear);
        timeline.start();

        timeline.tick(0.25);
        assert_eq!(timeline.progress(id), Some(0.25));

        timeline.tick(1.0);
        assert_eq!(timeline.progress(id), Some(1.0));
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_offset_entry_waits() {
        let mut timeline = Timeline::new();
        let first = timeline.add(0.0, 0.3, Easing::Linear);
        let second = timeline.add(0.1, 0.3, Easing::Linear);
        assert!((timeline.end() - 0.4).abs() < 1e-6);

        timeline.start();
        timeline.tick(0.05);
        assert!(timeline.has_started(first));
        assert!(!timeline.has_started(second));
        assert_eq!(timeline.progress(second), Some(0.0));

        timeline.tick(0.1);
        assert!(timeline.has_started(second));
        assert!(timeline.progress(second).unwrap() > 0.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0.0, 0.0, Easing::EaseInOut);
        timeline.start();
        timeline.tick(0.0);
        assert_eq!(timeline.progress(id), Some(1.0));
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_instant_entry_waits_for_offset() {
        let mut timeline = Timeline::new();
        let first = timeline.add(0.0, 0.0, Easing::Linear);
        let later = timeline.add(0.2, 0.0, Easing::Linear);
        timeline.start();

        timeline.tick(0.1);
        assert_eq!(timeline.progress(first), Some(1.0));
        assert_eq!(timeline.progress(later), Some(0.0));

        timeline.tick(0.1);
        assert_eq!(timeline.progress(later), Some(1.0));
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_clear_resets() {
        let mut timeline = Timeline::new();
        timeline.add(0.2, 0.3, Easing::Linear);
        timeline.clear();
        assert!(timeline.is_empty());
        assert_eq!(timeline.end(), 0.0);
    }
}
