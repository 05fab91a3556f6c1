use crate::event::InputEvent;
use crate::model::Model;
use crate::runtime::Driver;
use crate::subscription::SubscriptionId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// `TestProgram` exercises the whole init/update/view cycle in a plain
/// `#[test]` function, with no tokio runtime or TTY. Immediate messages
/// returned by `update` are queued and flushed by
/// [`drain_messages`](TestProgram::drain_messages) (or automatically by
/// [`dispatch`](TestProgram::dispatch)). Subscriptions are reconciled with
/// the same id-diffing rules as the real runtime, so listener lifecycles can
/// be asserted on.
///
/// # Example
///
/// ```rust,ignore
/// let mut prog = TestProgram::<AuthScreen>::new(flags);
/// prog.dispatch(InputEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)));
/// assert!(prog.render_string(80, 40).contains("Welcome back"));
/// ```
pub struct TestProgram<M: Model> {
    driver: Driver<M>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        Self {
            driver: Driver::init(flags),
        }
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        self.driver.update(msg);
    }

    /// Process pending immediate messages until none are left.
    pub fn drain_messages(&mut self) {
        self.driver.drain();
    }

    /// Deliver an input event exactly as the terminal runtime does: to every
    /// attached listener, then drain the resulting messages.
    pub fn dispatch(&mut self, event: InputEvent) {
        self.driver.handle_input(&event);
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        self.driver.model()
    }

    /// Ids of the currently attached listeners.
    pub fn active_listeners(&self) -> Vec<&SubscriptionId> {
        self.driver.active_listeners().collect()
    }

    /// Total attach and detach operations performed so far.
    pub fn listener_churn(&self) -> (usize, usize) {
        self.driver.listener_churn()
    }

    /// Whether any update has asked to quit.
    pub fn has_quit(&self) -> bool {
        self.driver.should_quit()
    }

    /// The last terminal title requested.
    pub fn title(&self) -> Option<&str> {
        self.driver.title()
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| self.driver.model().view(frame))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }
}
