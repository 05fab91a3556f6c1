use crate::command::{Action, Command, CommandInner, TerminalCommand};
use crate::event::InputEvent;
use crate::model::Model;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        EventStream,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::VecDeque;
use std::io::{self, stdout, Stdout};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration options for a [`Program`].
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Target frames per second (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Capture mouse input so pointer listeners receive clicks (default: true).
    pub mouse: bool,
    /// Initial terminal title.
    pub title: Option<String>,
    /// Whether to restore the terminal from a panic hook (default: true).
    pub catch_panics: bool,
    /// Whether to quit on SIGINT (default: true).
    pub handle_signals: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            mouse: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
        }
    }
}

/// The terminal-free half of the runtime: the model, its listeners and the
/// queue of pending messages.
///
/// Everything runs on the caller's task. An input event is delivered to
/// every attached listener and the resulting messages, plus any messages
/// their commands produce, are fully processed before the next event is
/// taken, so updates happen in arrival order.
pub(crate) struct Driver<M: Model> {
    model: M,
    subscriptions: SubscriptionManager<M::Message>,
    queue: VecDeque<M::Message>,
    title: Option<String>,
    pending_title: Option<String>,
    should_quit: bool,
    needs_redraw: bool,
}

impl<M: Model> Driver<M> {
    /// Run [`Model::init`], apply its command and attach its listeners.
    /// Messages produced by the init command stay queued.
    pub fn init(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut driver = Self {
            model,
            subscriptions: SubscriptionManager::new(),
            queue: VecDeque::new(),
            title: None,
            pending_title: None,
            should_quit: false,
            needs_redraw: true,
        };
        driver.execute_command(init_cmd);
        driver.reconcile();
        driver
    }

    /// One update cycle. Follow-up messages are queued, not processed.
    pub fn update(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_command(cmd);
        self.reconcile();
        self.needs_redraw = true;
    }

    /// Process queued messages until none are left.
    pub fn drain(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            self.update(msg);
        }
    }

    /// Deliver one input event to the attached listeners, then drain.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if matches!(event, InputEvent::Resize(..)) {
            self.needs_redraw = true;
        }
        self.queue.extend(self.subscriptions.dispatch(event));
        self.drain();
    }

    fn reconcile(&mut self) {
        let declared = self.model.subscriptions();
        self.subscriptions.reconcile(declared);
        tracing::trace!(
            listeners = self.subscriptions.active_count(),
            "subscriptions reconciled"
        );
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.queue.push_back(msg),
            CommandInner::Action(Action::Quit) => self.should_quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
            CommandInner::Terminal(TerminalCommand::SetTitle(title)) => {
                self.pending_title = Some(title.clone());
                self.title = Some(title);
            }
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The last title requested by a command.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// A title requested since the last call, if any.
    pub fn take_pending_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }

    /// Whether anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn active_listeners(&self) -> impl Iterator<Item = &SubscriptionId> {
        self.subscriptions.active_ids()
    }

    pub fn listener_churn(&self) -> (usize, usize) {
        self.subscriptions.churn()
    }

    pub fn shutdown(&mut self) {
        self.subscriptions.shutdown();
    }
}

/// The program runtime. Owns the terminal and feeds it a [`Driver`].
///
/// Terminal events are read once, normalized into [`InputEvent`]s and
/// handed to every attached [`Subscription`](crate::Subscription) in turn
/// on the update task.
///
/// # Example
///
/// ```rust,ignore
/// let model = Program::<AuthScreen>::with_options(flags, options)?.run().await?;
/// ```
pub struct Program<M: Model> {
    driver: Driver<M>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: ProgramOptions,
}

impl<M: Model> Program<M> {
    /// Create a new program. Puts the terminal into raw mode on the
    /// alternate screen.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let driver = Driver::init(flags);
        let terminal = init_terminal(&options)?;
        tracing::debug!("program initialized");
        Ok(Self {
            driver,
            terminal,
            options,
        })
    }

    /// Run the program until the model quits. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        tracing::debug!("shutting down");
        self.driver.shutdown();
        restore_terminal()?;
        result.map(|()| self.driver.into_model())
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.driver.drain();
        self.flush_title();
        if self.driver.should_quit() {
            return Ok(());
        }
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut terminal_events = EventStream::new();
        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::debug!("received ctrl+c signal");
                    return Ok(());
                }

                Some(raw) = terminal_events.next() => {
                    let Some(event) = InputEvent::from_crossterm(raw?) else {
                        continue;
                    };
                    self.driver.handle_input(&event);
                    self.flush_title();
                    if self.driver.should_quit() {
                        return Ok(());
                    }
                }

                _ = frame_interval.tick() => {
                    if self.driver.take_redraw() {
                        self.render()?;
                    }
                }
            }
        }
    }

    fn flush_title(&mut self) {
        if let Some(title) = self.driver.take_pending_title() {
            execute!(stdout(), SetTitle(title)).ok();
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        let model = self.driver.model();
        self.terminal.draw(|frame| model.view(frame))?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Install the restoring panic hook only once to avoid stacking.
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal();
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();
    execute!(writer, EnterAlternateScreen, EnableBracketedPaste)?;
    if options.mouse {
        execute!(writer, EnableMouseCapture)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(writer))?)
}

fn restore_terminal() -> Result<(), io::Error> {
    // Best effort: keep restoring even if individual steps fail.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, DisableMouseCapture).ok();
    execute!(writer, cursor::Show).ok();
    execute!(writer, LeaveAlternateScreen).ok();
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::{input_events, pointer_down, Subscription};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    // Records what reaches `update`. A click also queues a follow-up
    // message, the way a select's choice does.
    struct Log {
        seen: Vec<String>,
    }

    #[derive(Debug)]
    enum LogMsg {
        Key(char),
        Click(u16, u16),
        Chosen,
    }

    impl Model for Log {
        type Message = LogMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<LogMsg>) {
            (Log { seen: Vec::new() }, Command::set_title("log"))
        }

        fn update(&mut self, msg: LogMsg) -> Command<LogMsg> {
            match msg {
                LogMsg::Key(c) => {
                    self.seen.push(format!("key {c}"));
                    Command::none()
                }
                LogMsg::Click(column, row) => {
                    self.seen.push(format!("click {column},{row}"));
                    Command::message(LogMsg::Chosen)
                }
                LogMsg::Chosen => {
                    self.seen.push("chosen".to_string());
                    Command::none()
                }
            }
        }

        fn view(&self, _frame: &mut ratatui::Frame) {}

        fn subscriptions(&self) -> Vec<Subscription<LogMsg>> {
            vec![
                pointer_down("role", |column, row| Some(LogMsg::Click(column, row))),
                input_events(|event| match event {
                    InputEvent::Key(key) => match key.code {
                        KeyCode::Char(c) => Some(LogMsg::Key(c)),
                        _ => None,
                    },
                    _ => None,
                }),
            ]
        }
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn input_reaches_update_in_arrival_order() {
        let mut driver = Driver::<Log>::init(());
        driver.handle_input(&key('a'));
        driver.handle_input(&InputEvent::PointerDown { column: 3, row: 7 });
        driver.handle_input(&key('b'));

        assert_eq!(
            driver.model().seen,
            vec!["key a", "click 3,7", "chosen", "key b"]
        );
    }

    #[test]
    fn a_burst_of_keys_is_never_dropped() {
        let mut driver = Driver::<Log>::init(());
        for _ in 0..500 {
            driver.handle_input(&key('x'));
        }
        assert_eq!(driver.model().seen.len(), 500);
    }

    #[test]
    fn title_is_reported_once() {
        let mut driver = Driver::<Log>::init(());
        assert_eq!(driver.title(), Some("log"));
        assert_eq!(driver.take_pending_title().as_deref(), Some("log"));
        assert_eq!(driver.take_pending_title(), None);
        assert_eq!(driver.title(), Some("log"));
    }

    #[test]
    fn redraw_is_requested_after_updates_only() {
        let mut driver = Driver::<Log>::init(());
        assert!(driver.take_redraw());
        assert!(!driver.take_redraw());
        driver.handle_input(&InputEvent::Resize(80, 24));
        assert!(driver.take_redraw());
        driver.handle_input(&key('a'));
        assert!(driver.take_redraw());
    }
}
