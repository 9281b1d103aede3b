//! Repetition counter
//!
//! Counts one rep each time the configured stage transition fires.
//! It never looks at angles.

use super::stage::Transition;

pub struct RepCounter {
    /// Transition that completes one repetition
    counted: Transition,
    count: u32,
}

impl RepCounter {
    pub fn new(counted: Transition) -> Self {
        Self { counted, count: 0 }
    }

    /// Observe a transition; returns true when it completed a rep
    pub fn observe(&mut self, transition: Transition) -> bool {
        if transition != self.counted {
            return false;
        }
        self.count = self.count.saturating_add(1);
        true
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn counted(&self) -> Transition {
        self.counted
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
