//! Selected courses and participant counts

use indexmap::IndexMap;

/// Course ids picked for booking, each with a participant count of at least 1
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    items: IndexMap<String, u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select with one participant, or deselect. Returns whether the course is
    /// now selected.
    pub fn toggle(&mut self, course_id: &str) -> bool {
        if self.items.shift_remove(course_id).is_some() {
            false
        } else {
            self.items.insert(course_id.to_string(), 1);
            true
        }
    }

    /// Select with a given participant count (at least 1)
    pub fn select(&mut self, course_id: &str, quantity: u32) {
        self.items.insert(course_id.to_string(), quantity.max(1));
    }

    pub fn is_selected(&self, course_id: &str) -> bool {
        self.items.contains_key(course_id)
    }

    pub fn quantity(&self, course_id: &str) -> Option<u32> {
        self.items.get(course_id).copied()
    }

    /// Change the participant count of a selected course, never below 1.
    /// Unselected ids are ignored.
    pub fn update_quantity(&mut self, course_id: &str, delta: i32) -> Option<u32> {
        let quantity = self.items.get_mut(course_id)?;
        let next = (*quantity as i64 + delta as i64).clamp(1, u32::MAX as i64);
        *quantity = next as u32;
        Some(*quantity)
    }

    /// Number of selected courses, as shown on the header badge
    pub fn selected_count(&self) -> usize {
        self.items.len()
    }

    /// Participants across every selected course, saturating at `u32::MAX`
    pub fn total_persons(&self) -> u32 {
        self.items.values().fold(0u32, |acc, q| acc.saturating_add(*q))
    }

    /// `(course_id, quantity)` in selection order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, q)| (id.as_str(), *q))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
