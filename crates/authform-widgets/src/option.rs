//! Options offered by choice controls.

/// An immutable (value, label) pair. `value` is what gets stored, `label` is
/// what the user sees and what search matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Find the label for a stored value.
pub fn label_for<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a str> {
    options.iter().find(|o| o.value == value).map(|o| o.label)
}
