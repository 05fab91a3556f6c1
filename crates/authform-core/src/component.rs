use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// What a parent hands a controlled component on every update and render:
/// the externally owned value and the error to show beneath it, if any.
#[derive(Debug)]
pub struct Props<'a, V: ?Sized> {
    /// The bound value. The component never owns it.
    pub value: &'a V,
    /// Validation message to render under the control.
    pub error: Option<&'a str>,
}

impl<V: ?Sized> Clone for Props<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> Copy for Props<'_, V> {}

impl<'a, V: ?Sized> Props<'a, V> {
    /// Props carrying a value and no error.
    pub fn new(value: &'a V) -> Self {
        Self { value, error: None }
    }

    /// Attach an error message. Empty strings count as no error.
    pub fn with_error(mut self, error: Option<&'a str>) -> Self {
        self.error = error.filter(|e| !e.is_empty());
        self
    }
}

/// A reusable, *controlled* control that renders into a given [`Rect`].
///
/// Unlike [`Model`](crate::Model), a component does not own the value it
/// edits. The parent passes the current value into
/// [`update`](Component::update) and [`view`](Component::view); when input
/// should change it, the component returns a command carrying the proposed
/// new value and the parent decides whether to store it. Transient UI state
/// (cursor position, highlight, an open popover) may live in the component.
///
/// # Composition pattern
///
/// ```rust,ignore
/// fn update(&mut self, msg: Msg) -> Command<Msg> {
///     match msg {
///         Msg::Email(m) => self
///             .email
///             .update(m, &self.form.values.email)
///             .map(|m| match m {
///                 text_input::Message::Changed(ev) => Msg::Change(ev),
///                 other => Msg::Email(other),
///             }),
///         Msg::Change(ev) => { /* merge into the value store */ }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// The type of the externally owned value this control is bound to.
    type Value: ?Sized;

    /// Process a message against the current bound value.
    fn update(&mut self, msg: Self::Message, value: &Self::Value) -> Command<Self::Message>;

    /// Render into `area`. Implementations confine drawing to that rectangle.
    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, Self::Value>);

    /// Rows this control needs for the given props, including its label and
    /// error line.
    fn height(&self, props: Props<'_, Self::Value>) -> u16;

    /// Declare listeners owned by this component. The parent collects them
    /// into its own [`Model::subscriptions`](crate::Model::subscriptions).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has focus.
    fn focused(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_error_counts_as_none() {
        let props = Props::new("x").with_error(Some(""));
        assert!(props.error.is_none());

        let props = Props::new("x").with_error(Some("Email is required"));
        assert_eq!(props.error, Some("Email is required"));
    }
}
