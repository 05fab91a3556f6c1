//! The normalized change event every control emits.
//!
//! Heterogeneous controls report edits in one of three shapes so a single
//! handler in the parent can consume all of them by matching on the tag.

/// A proposed new value for the field called `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Text-like controls, radio groups and selects: the whole new string.
    Text { name: String, value: String },
    /// Checkbox groups: the entire new membership array, not a delta.
    Multi { name: String, values: Vec<String> },
    /// Checkboxes and toggles: the new checked state.
    Bool { name: String, checked: bool },
}

impl ChangeEvent {
    /// The name of the field this event targets.
    pub fn name(&self) -> &str {
        match self {
            ChangeEvent::Text { name, .. }
            | ChangeEvent::Multi { name, .. }
            | ChangeEvent::Bool { name, .. } => name,
        }
    }

    /// Whether this event has the checkbox shape (boolean or membership).
    pub fn is_checkbox_shaped(&self) -> bool {
        matches!(self, ChangeEvent::Multi { .. } | ChangeEvent::Bool { .. })
    }
}
