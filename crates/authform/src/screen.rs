//! The authentication screen: a [`Model`] that lays out the controls for
//! the current mode, routes input to the focused one, and runs submission
//! through the form wrapper.

use authform_core::{input_events, Command, InputEvent, Model, Subscription};
use authform_widgets::focus::FocusRing;
use authform_widgets::form::{Form, Intercept, SubmitButton};
use authform_widgets::select;
use authform_widgets::ChangeEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::controls::{Controls, FieldMsg};
use crate::form::{Field, FormMode, FormState, SubmitOutcome};
use crate::submit::SubmitHandler;

const MAX_WIDTH: u16 = 64;

/// Navigation links shown under the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    ForgotPassword,
    SignUp,
    SignIn,
    BackToLogin,
}

impl Link {
    pub fn label(self) -> &'static str {
        match self {
            Link::ForgotPassword => "Forgot password?",
            Link::SignUp => "Sign up",
            Link::SignIn => "Sign in",
            Link::BackToLogin => "Back to login",
        }
    }

    /// The mode this link switches to.
    pub fn target(self) -> FormMode {
        match self {
            Link::ForgotPassword => FormMode::ForgotPassword,
            Link::SignUp => FormMode::Register,
            Link::SignIn | Link::BackToLogin => FormMode::Login,
        }
    }

    pub fn for_mode(mode: FormMode) -> &'static [Link] {
        match mode {
            FormMode::Login => &[Link::ForgotPassword, Link::SignUp],
            FormMode::Register => &[Link::SignIn],
            FormMode::ForgotPassword => &[Link::BackToLogin],
        }
    }
}

/// A focusable position on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field(Field),
    Submit,
    Link(Link),
}

/// Focus order for a mode: its fields, the submit button, then its links.
pub fn slots_for(mode: FormMode) -> Vec<Slot> {
    mode.fields()
        .iter()
        .map(|f| Slot::Field(*f))
        .chain([Slot::Submit])
        .chain(Link::for_mode(mode).iter().map(|l| Slot::Link(*l)))
        .collect()
}

pub fn window_title(mode: FormMode) -> String {
    format!("authform - {}", mode.title())
}

/// Outcome line shown under the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success(String),
    Failure(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Success(text) | Status::Failure(text) => text,
        }
    }
}

fn success_message(mode: FormMode, email: &str) -> String {
    match mode {
        FormMode::Login => format!("Signed in as {email}"),
        FormMode::Register => format!("Account created for {email}"),
        FormMode::ForgotPassword => format!("Reset link sent to {email}"),
    }
}

fn blocked_message(errors: usize) -> String {
    format!("Please fix {errors} error(s)")
}

#[derive(Debug)]
pub enum Msg {
    /// Key or paste input from the screen-wide listener.
    Input(InputEvent),
    /// A message for one field's control.
    Field(FieldMsg),
    /// A control proposed a new value.
    Change(ChangeEvent),
    /// Switch to another mode.
    Navigate(FormMode),
    Quit,
}

/// Initialization data for [`AuthScreen`].
pub struct ScreenFlags {
    pub mode: FormMode,
    pub bio_max_length: usize,
    pub handler: Box<dyn SubmitHandler>,
}

impl ScreenFlags {
    pub fn new(mode: FormMode, handler: impl SubmitHandler) -> Self {
        Self {
            mode,
            bio_max_length: 500,
            handler: Box::new(handler),
        }
    }

    pub fn with_bio_max_length(mut self, max: usize) -> Self {
        self.bio_max_length = max;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Title,
    Subtitle,
    Slot(Slot),
    Status,
    Links,
}

#[derive(Debug, Clone, Copy)]
struct Placed {
    row: Row,
    top: u16,
    height: u16,
}

pub struct AuthScreen {
    form: FormState,
    controls: Controls,
    focus: FocusRing<Slot>,
    submit_button: SubmitButton,
    status: Option<Status>,
    handler: Box<dyn SubmitHandler>,
}

impl AuthScreen {
    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn focused(&self) -> Option<Slot> {
        self.focus.focused()
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    fn apply_focus(&mut self) {
        for field in Field::ALL {
            let focused = self.focus.is_focused(Slot::Field(field));
            self.controls.set_focus(field, focused);
        }
    }

    fn move_focus(&mut self, forward: bool) {
        if forward {
            self.focus.focus_next();
        } else {
            self.focus.focus_prev();
        }
        self.apply_focus();
    }

    fn focus_slot(&mut self, slot: Slot) {
        if self.focus.focus(slot) {
            self.apply_focus();
        }
    }

    fn navigate(&mut self, mode: FormMode) -> Command<Msg> {
        self.form.set_mode(mode);
        self.status = None;
        self.focus = FocusRing::new(slots_for(mode));
        self.submit_button.set_label(mode.submit_label());
        self.apply_focus();
        Command::set_title(window_title(mode))
    }

    fn submit(&mut self) -> Command<Msg> {
        let mode = self.form.mode;
        match self.form.submit() {
            SubmitOutcome::Accepted => {
                tracing::info!(%mode, "submission accepted");
                self.handler.submit(mode, &self.form.values);
                self.status = Some(Status::Success(success_message(
                    mode,
                    &self.form.values.email,
                )));
            }
            SubmitOutcome::Blocked(count) => {
                tracing::debug!(%mode, errors = count, "submission blocked by validation");
                self.status = Some(Status::Failure(blocked_message(count)));
            }
        }
        Command::none()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Command::quit();
        }
        match key.code {
            KeyCode::Esc => {
                return match self.controls.open_select() {
                    Some(field) => self.update_field(FieldMsg::key(field, key)),
                    None => Command::quit(),
                };
            }
            KeyCode::Tab => {
                self.move_focus(true);
                return Command::none();
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                return Command::none();
            }
            _ => {}
        }

        let on_submit = self.focus.is_focused(Slot::Submit);
        match Form::intercept(key, on_submit, self.form.is_valid()) {
            Intercept::Submit => self.submit(),
            Intercept::Blocked => {
                tracing::debug!(errors = self.form.errors.len(), "submit gesture blocked");
                self.status = Some(Status::Failure(blocked_message(self.form.errors.len())));
                Command::none()
            }
            Intercept::Pass(key) => self.route_key(key),
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Command<Msg> {
        let Some(slot) = self.focus.focused() else {
            return Command::none();
        };
        let vertical = key.modifiers == KeyModifiers::NONE
            && matches!(key.code, KeyCode::Up | KeyCode::Down);
        let forward = key.code == KeyCode::Down;

        match slot {
            Slot::Link(link) if key.code == KeyCode::Enter => self.navigate(link.target()),
            Slot::Field(field) if !(vertical && self.controls.is_single_line(field)) => {
                self.update_field(FieldMsg::key(field, key))
            }
            _ => {
                if vertical {
                    self.move_focus(forward);
                }
                Command::none()
            }
        }
    }

    fn update_field(&mut self, msg: FieldMsg) -> Command<Msg> {
        let clicked_select = match &msg {
            FieldMsg::Select(field, select::Message::PointerDown { .. }) => Some(*field),
            _ => None,
        };
        let cmd = self.controls.update(msg, &self.form.values);

        // A click that opened a select moves focus to it.
        if let Some(field) = clicked_select {
            let opened = self
                .controls
                .select(field)
                .is_some_and(select::SearchableSelect::is_open);
            if opened && !self.focus.is_focused(Slot::Field(field)) {
                self.focus_slot(Slot::Field(field));
            }
        }
        cmd
    }

    fn layout(&self) -> (Vec<Placed>, u16) {
        let mut placed = Vec::new();
        let mut top = 0;
        let mut push = |row: Row, height: u16, gap: u16, top: &mut u16| {
            placed.push(Placed {
                row,
                top: *top,
                height,
            });
            *top += height + gap;
        };

        push(Row::Title, 1, 0, &mut top);
        push(Row::Subtitle, 1, 1, &mut top);
        for field in self.form.mode.fields() {
            let height = self.controls.height(*field, &self.form);
            push(Row::Slot(Slot::Field(*field)), height, 0, &mut top);
        }
        top += 1;
        push(Row::Slot(Slot::Submit), 1, 0, &mut top);
        if self.status.is_some() {
            push(Row::Status, 1, 0, &mut top);
        }
        push(Row::Links, 1, 0, &mut top);
        (placed, top)
    }

    fn focused_row(&self) -> Option<Row> {
        match self.focus.focused()? {
            Slot::Link(_) => Some(Row::Links),
            slot => Some(Row::Slot(slot)),
        }
    }

    /// Rows scrolled off the top so the focused slot stays in view.
    fn scroll(&self, placed: &[Placed], viewport: u16) -> u16 {
        let focused = self.focused_row();
        placed
            .iter()
            .find(|p| Some(p.row) == focused)
            .map_or(0, |p| (p.top + p.height).saturating_sub(viewport))
    }

    fn render_row(&self, frame: &mut Frame, row: Row, area: Rect) {
        match row {
            Row::Title => frame.render_widget(
                Paragraph::new(self.form.mode.title())
                    .style(Style::default().add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center),
                area,
            ),
            Row::Subtitle => frame.render_widget(
                Paragraph::new(self.form.mode.subtitle())
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                area,
            ),
            Row::Slot(Slot::Field(field)) => self.controls.view(field, frame, area, &self.form),
            Row::Slot(Slot::Submit) => self.submit_button.view(
                frame,
                area,
                self.focus.is_focused(Slot::Submit),
                self.form.is_valid(),
            ),
            Row::Slot(Slot::Link(_)) | Row::Links => self.render_links(frame, area),
            Row::Status => {
                if let Some(status) = &self.status {
                    let color = match status {
                        Status::Success(_) => Color::Green,
                        Status::Failure(_) => Color::Red,
                    };
                    frame.render_widget(
                        Paragraph::new(status.text().to_string())
                            .style(Style::default().fg(color))
                            .alignment(Alignment::Center),
                        area,
                    );
                }
            }
        }
    }

    fn render_links(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, link) in Link::for_mode(self.form.mode).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
            }
            let style = if self.focus.is_focused(Slot::Link(*link)) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED)
            };
            spans.push(Span::styled(link.label(), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}

impl Model for AuthScreen {
    type Message = Msg;
    type Flags = ScreenFlags;

    fn init(flags: ScreenFlags) -> (Self, Command<Msg>) {
        let mode = flags.mode;
        let mut screen = AuthScreen {
            form: FormState::new(mode),
            controls: Controls::new(flags.bio_max_length),
            focus: FocusRing::new(slots_for(mode)),
            submit_button: SubmitButton::new(mode.submit_label()),
            status: None,
            handler: flags.handler,
        };
        screen.apply_focus();
        tracing::info!(%mode, "screen ready");
        (screen, Command::set_title(window_title(mode)))
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Input(InputEvent::Key(key)) => self.handle_key(key),
            Msg::Input(InputEvent::Paste(text)) => match self.focus.focused() {
                Some(Slot::Field(field)) => match FieldMsg::paste(field, text) {
                    Some(msg) => self.update_field(msg),
                    None => Command::none(),
                },
                _ => Command::none(),
            },
            Msg::Input(_) => Command::none(),
            Msg::Field(msg) => self.update_field(msg),
            Msg::Change(event) => {
                if let Err(err) = self.form.apply_change(&event) {
                    tracing::warn!(%err, "change event dropped");
                }
                Command::none()
            }
            Msg::Navigate(mode) => self.navigate(mode),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        let width = body.width.min(MAX_WIDTH);
        let column = Rect {
            x: body.x + (body.width - width) / 2,
            width,
            ..body
        };

        let (placed, _) = self.layout();
        let scroll = self.scroll(&placed, column.height);

        for p in &placed {
            let visible = p.top >= scroll && p.top + p.height - scroll <= column.height;
            if !visible {
                if let Row::Slot(Slot::Field(field)) = p.row {
                    if let Some(select) = self.controls.select(field) {
                        select.clear_bounds();
                    }
                }
                continue;
            }
            let area = Rect {
                y: column.y + p.top - scroll,
                height: p.height,
                ..column
            };
            self.render_row(frame, p.row, area);
        }

        // Popovers paint last, over the fields below them.
        for field in self.form.mode.fields() {
            if let Some(select) = self.controls.select(*field) {
                select.view_popover(frame);
            }
        }

        frame.render_widget(
            Paragraph::new("Tab/Shift+Tab move  ·  Enter select  ·  Ctrl+S submit  ·  Esc quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            footer,
        );
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![input_events(|event| match event {
            InputEvent::Key(_) | InputEvent::Paste(_) => Some(Msg::Input(event.clone())),
            _ => None,
        })];
        subs.extend(self.controls.subscriptions(self.form.mode));
        subs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormValues;
    use crate::validate;
    use authform_core::testing::TestProgram;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(FormMode, FormValues)>>>;

    struct Recorder(Calls);

    impl SubmitHandler for Recorder {
        fn submit(&mut self, mode: FormMode, values: &FormValues) {
            self.0.lock().unwrap().push((mode, values.clone()));
        }
    }

    fn program(mode: FormMode) -> (TestProgram<AuthScreen>, Calls) {
        let calls = Calls::default();
        let flags = ScreenFlags::new(mode, Recorder(calls.clone()));
        (TestProgram::new(flags), calls)
    }

    fn press(prog: &mut TestProgram<AuthScreen>, code: KeyCode) {
        prog.dispatch(InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(prog: &mut TestProgram<AuthScreen>, text: &str) {
        for c in text.chars() {
            press(prog, KeyCode::Char(c));
        }
    }

    fn ctrl_s(prog: &mut TestProgram<AuthScreen>) {
        prog.dispatch(InputEvent::Key(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
        )));
    }

    fn tab(prog: &mut TestProgram<AuthScreen>, times: usize) {
        for _ in 0..times {
            press(prog, KeyCode::Tab);
        }
    }

    #[test]
    fn slot_order_is_fields_then_submit_then_links() {
        assert_eq!(
            slots_for(FormMode::Login),
            vec![
                Slot::Field(Field::Email),
                Slot::Field(Field::Password),
                Slot::Field(Field::RememberMe),
                Slot::Submit,
                Slot::Link(Link::ForgotPassword),
                Slot::Link(Link::SignUp),
            ]
        );
        assert_eq!(
            slots_for(FormMode::ForgotPassword),
            vec![
                Slot::Field(Field::Email),
                Slot::Submit,
                Slot::Link(Link::BackToLogin),
            ]
        );
    }

    #[test]
    fn renders_login_titles() {
        let (prog, _) = program(FormMode::Login);
        let screen = prog.render_string(80, 30);
        assert!(screen.contains("Welcome back"));
        assert!(screen.contains("Sign in to your account"));
        assert!(screen.contains("Forgot password?"));
        assert_eq!(prog.title(), Some("authform - Welcome back"));
    }

    #[test]
    fn blocked_submit_shows_inline_errors_without_calling_handler() {
        let (mut prog, calls) = program(FormMode::Login);
        ctrl_s(&mut prog);

        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(
            prog.model().status(),
            Some(&Status::Failure("Please fix 2 error(s)".into()))
        );
        let screen = prog.render_string(80, 30);
        assert!(screen.contains(validate::EMAIL_REQUIRED));
        assert!(screen.contains(validate::PASSWORD_REQUIRED));

        // The form is now invalid, so the gesture is consumed without
        // re-running validation.
        ctrl_s(&mut prog);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn valid_login_calls_handler_once() {
        let (mut prog, calls) = program(FormMode::Login);
        type_text(&mut prog, "ada@example.com");
        tab(&mut prog, 1);
        type_text(&mut prog, "secret");
        ctrl_s(&mut prog);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (mode, values) = &calls[0];
        assert_eq!(*mode, FormMode::Login);
        assert_eq!(values.email, "ada@example.com");
        assert_eq!(values.password, "secret");
        assert_eq!(
            prog.model().status(),
            Some(&Status::Success("Signed in as ada@example.com".into()))
        );
    }

    #[test]
    fn enter_on_submit_button_submits() {
        let (mut prog, calls) = program(FormMode::ForgotPassword);
        type_text(&mut prog, "ada@example.com");
        tab(&mut prog, 1);
        assert_eq!(prog.model().focused(), Some(Slot::Submit));
        press(&mut prog, KeyCode::Enter);

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(
            prog.model().status(),
            Some(&Status::Success("Reset link sent to ada@example.com".into()))
        );
    }

    #[test]
    fn editing_clears_only_that_fields_error() {
        let (mut prog, _) = program(FormMode::Login);
        ctrl_s(&mut prog);
        type_text(&mut prog, "a");

        let errors = &prog.model().form().errors;
        assert!(!errors.contains(Field::Email));
        assert!(errors.contains(Field::Password));
        assert_eq!(prog.model().form().values.email, "a");
    }

    #[test]
    fn link_navigation_resets_errors_status_and_title() {
        let (mut prog, _) = program(FormMode::Login);
        ctrl_s(&mut prog);
        assert!(prog.model().status().is_some());

        // email, password, rememberMe, submit, then the first link.
        tab(&mut prog, 4);
        assert_eq!(prog.model().focused(), Some(Slot::Link(Link::ForgotPassword)));
        press(&mut prog, KeyCode::Enter);

        let screen = prog.model();
        assert_eq!(screen.form().mode, FormMode::ForgotPassword);
        assert!(screen.form().errors.is_empty());
        assert_eq!(screen.status(), None);
        assert_eq!(screen.focused(), Some(Slot::Field(Field::Email)));
        assert_eq!(prog.title(), Some("authform - Reset your password"));
        assert!(prog.render_string(80, 30).contains("Send Reset Link"));
    }

    #[test]
    fn values_survive_mode_switches() {
        let (mut prog, _) = program(FormMode::Login);
        type_text(&mut prog, "ada@example.com");
        prog.send(Msg::Navigate(FormMode::Register));
        prog.send(Msg::Navigate(FormMode::Login));
        assert_eq!(prog.model().form().values.email, "ada@example.com");
    }

    #[test]
    fn select_listeners_follow_the_visible_mode() {
        let (mut prog, _) = program(FormMode::Login);
        assert_eq!(prog.active_listeners().len(), 1);
        assert_eq!(prog.listener_churn(), (1, 0));

        prog.send(Msg::Navigate(FormMode::Register));
        assert_eq!(prog.active_listeners().len(), 3);
        assert_eq!(prog.listener_churn(), (3, 0));

        // Re-renders and focus moves leave running listeners alone.
        tab(&mut prog, 3);
        type_text(&mut prog, "abc");
        let _ = prog.render_string(100, 80);
        assert_eq!(prog.listener_churn(), (3, 0));

        prog.send(Msg::Navigate(FormMode::Login));
        assert_eq!(prog.active_listeners().len(), 1);
        assert_eq!(prog.listener_churn(), (3, 2));
    }

    #[test]
    fn register_renders_bio_counter() {
        let (prog, _) = program(FormMode::Register);
        let screen = prog.render_string(100, 80);
        assert!(screen.contains("Create an account"));
        assert!(screen.contains("0/500"));
    }

    #[test]
    fn outside_click_closes_open_select() {
        let (mut prog, _) = program(FormMode::Register);
        // name, email, password, confirmPassword, gender, then role.
        tab(&mut prog, 5);
        assert_eq!(prog.model().focused(), Some(Slot::Field(Field::Role)));
        press(&mut prog, KeyCode::Enter);
        assert_eq!(prog.model().controls().open_select(), Some(Field::Role));

        let _ = prog.render(100, 80);
        prog.dispatch(InputEvent::PointerDown { column: 0, row: 0 });
        assert_eq!(prog.model().controls().open_select(), None);
    }

    fn locate(screen: &str, needle: &str) -> (u16, u16) {
        screen
            .lines()
            .enumerate()
            .find_map(|(row, line)| {
                line.find(needle)
                    .map(|byte| (line[..byte].chars().count() as u16, row as u16))
            })
            .unwrap()
    }

    #[test]
    fn keys_and_clicks_apply_in_arrival_order() {
        let (mut prog, _) = program(FormMode::Register);
        tab(&mut prog, 1);
        assert_eq!(prog.model().focused(), Some(Slot::Field(Field::Email)));
        let (column, row) = locate(&prog.render_string(100, 80), "Select a role");

        press(&mut prog, KeyCode::Char('a'));
        prog.dispatch(InputEvent::PointerDown { column, row });
        press(&mut prog, KeyCode::Char('d'));

        let screen = prog.model();
        assert_eq!(screen.form().values.email, "a");
        assert_eq!(screen.focused(), Some(Slot::Field(Field::Role)));
        let role = screen.controls().select(Field::Role).unwrap();
        assert!(role.is_open());
        assert_eq!(role.search(), "d");
    }

    #[test]
    fn esc_closes_select_before_quitting() {
        let (mut prog, _) = program(FormMode::Register);
        tab(&mut prog, 5);
        press(&mut prog, KeyCode::Enter);

        press(&mut prog, KeyCode::Esc);
        assert_eq!(prog.model().controls().open_select(), None);
        assert!(!prog.has_quit());

        press(&mut prog, KeyCode::Esc);
        assert!(prog.has_quit());
    }

    #[test]
    fn checkbox_group_toggles_highlighted_interest() {
        let (mut prog, _) = program(FormMode::Register);
        // ... role, then interests.
        tab(&mut prog, 6);
        assert_eq!(prog.model().focused(), Some(Slot::Field(Field::Interests)));
        press(&mut prog, KeyCode::Down);
        press(&mut prog, KeyCode::Char(' '));
        assert_eq!(prog.model().form().values.interests, vec!["music".to_string()]);

        press(&mut prog, KeyCode::Char(' '));
        assert!(prog.model().form().values.interests.is_empty());
    }

    #[test]
    fn down_moves_focus_from_single_line_fields() {
        let (mut prog, _) = program(FormMode::Login);
        press(&mut prog, KeyCode::Down);
        assert_eq!(prog.model().focused(), Some(Slot::Field(Field::Password)));
        press(&mut prog, KeyCode::Up);
        assert_eq!(prog.model().focused(), Some(Slot::Field(Field::Email)));
    }

    #[test]
    fn ctrl_c_quits() {
        let (mut prog, _) = program(FormMode::Login);
        prog.dispatch(InputEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(prog.has_quit());
    }
}
