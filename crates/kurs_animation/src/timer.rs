//! Virtual-clock timers
//!
//! Timers carry a payload and fire when the owner's clock passes their due
//! time. Firing order is due time, then scheduling order.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::time::Duration;

new_key_type! {
    pub struct TimerId;
}

#[derive(Debug, Clone)]
struct Timer<T> {
    due: Duration,
    seq: u64,
    payload: T,
}

/// Pending delayed actions keyed by [`TimerId`]
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule `payload` to fire at `due`
    pub fn schedule(&mut self, due: Duration, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer { due, seq, payload })
    }

    /// Remove a pending timer, returning its payload if it had not fired
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|t| t.payload)
    }

    /// Cancel every pending timer whose payload matches `pred`; returns how many
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| !pred(&t.payload));
        before - self.timers.len()
    }

    /// Cancel every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Remove and return every payload due at or before `now`, oldest first
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        // Hover intents rarely have more than a couple due at once
        let mut due: SmallVec<[(Duration, u64, TimerId); 4]> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| (t.due, t.seq, id))
            .collect();
        due.sort_unstable_by_key(|&(at, seq, _)| (at, seq));

        due.into_iter()
            .filter_map(|(_, _, id)| self.timers.remove(id))
            .map(|t| t.payload)
            .collect()
    }

    /// Earliest due time among pending timers
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.due).min()
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(300), "late");
        queue.schedule(ms(100), "early");
        queue.schedule(ms(100), "early-second");

        assert!(queue.drain_due(ms(50)).is_empty());
        assert_eq!(queue.drain_due(ms(100)), vec!["early", "early-second"]);
        assert_eq!(queue.next_due(), Some(ms(300)));
        assert_eq!(queue.drain_due(ms(1000)), vec!["late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(ms(10), 1);
        assert!(queue.contains(id));
        assert_eq!(queue.cancel(id), Some(1));
        assert!(queue.drain_due(ms(100)).is_empty());
        assert_eq!(queue.cancel(id), None);
    }

    #[test]
    fn test_cancel_where_matches_payload() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), "expand");
        queue.schedule(ms(20), "collapse");
        queue.schedule(ms(30), "expand");

        assert_eq!(queue.cancel_where(|p| *p == "expand"), 2);
        assert_eq!(queue.drain_due(ms(100)), vec!["collapse"]);
    }
}
