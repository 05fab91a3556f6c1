use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Normalized terminal input, as broadcast to every live [`Subscription`].
///
/// The runtime reads crossterm events once and converts them with
/// [`InputEvent::from_crossterm`]; events the form has no use for (focus
/// changes, mouse movement, key releases) are dropped there.
///
/// [`Subscription`]: crate::Subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press.
    Key(KeyEvent),
    /// Primary pointer button went down at (column, row).
    PointerDown { column: u16, row: u16 },
    /// Bracketed paste content.
    Paste(String),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
}

impl InputEvent {
    /// Convert a raw crossterm event, discarding the ones the form ignores.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(InputEvent::Key(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown {
                    column: mouse.column,
                    row: mouse.row,
                }),
                _ => None,
            },
            Event::Paste(text) => Some(InputEvent::Paste(text)),
            Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
            _ => None,
        }
    }
}
