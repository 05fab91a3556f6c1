//! Focus management for cycling keyboard focus across a fixed set of slots.

/// An ordered ring of focusable slots.
#[derive(Debug, Clone)]
pub struct FocusRing<T> {
    slots: Vec<T>,
    focused: usize,
}

impl<T: Copy + PartialEq> FocusRing<T> {
    /// Create a ring focused on the first slot.
    pub fn new(slots: Vec<T>) -> Self {
        Self { slots, focused: 0 }
    }

    /// The focused slot, or `None` for an empty ring.
    pub fn focused(&self) -> Option<T> {
        self.slots.get(self.focused).copied()
    }

    /// Position of the focused slot.
    pub fn index(&self) -> usize {
        self.focused
    }

    /// All slots, in focus order.
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    /// Move focus to the next slot, wrapping around after the last.
    pub fn focus_next(&mut self) {
        if !self.slots.is_empty() {
            self.focused = (self.focused + 1) % self.slots.len();
        }
    }

    /// Move focus to the previous slot, wrapping around before the first.
    pub fn focus_prev(&mut self) {
        let n = self.slots.len();
        if n > 0 {
            self.focused = (self.focused + n - 1) % n;
        }
    }

    /// Focus the given slot. Returns `false` if it is not in the ring.
    pub fn focus(&mut self, slot: T) -> bool {
        match self.slots.iter().position(|s| *s == slot) {
            Some(i) => {
                self.focused = i;
                true
            }
            None => false,
        }
    }

    /// Whether `slot` currently has focus.
    pub fn is_focused(&self, slot: T) -> bool {
        self.focused() == Some(slot)
    }
}
