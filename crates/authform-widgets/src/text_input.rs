//! Single-line controlled text input with normal and password echo modes.

use authform_core::{Command, Component, Props};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::change::ChangeEvent;
use crate::chrome::{self, Label};
use crate::runeutil;

/// Controls how the bound value is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoMode {
    /// Display characters as typed.
    #[default]
    Normal,
    /// Display each character as the given mask character.
    Password(char),
}

/// Messages for the text input component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard event to process.
    KeyPress(KeyEvent),
    /// Paste text at the cursor. Newlines are dropped.
    Paste(String),
    /// Emitted with the proposed new value after every edit.
    Changed(ChangeEvent),
}

/// A single-line text input bound to a `str` owned by the parent.
///
/// The input keeps only its cursor. Every edit is computed against the bound
/// value and reported as [`ChangeEvent::Text`] carrying the whole new value;
/// the parent decides whether to store it.
///
/// # Example
///
/// ```ignore
/// let mut email = TextInput::new("email")
///     .with_label(Label::new("Email").required(true))
///     .with_placeholder("you@example.com");
/// email.focus();
///
/// // update: email.update(msg, &values.email)
/// // view:   email.view(frame, area, Props::new(values.email.as_str()).with_error(err))
/// ```
pub struct TextInput {
    name: String,
    label: Label,
    placeholder: String,
    echo_mode: EchoMode,
    cursor: usize,
    focus: bool,
}

impl TextInput {
    /// Create an input for the field called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Label::default(),
            placeholder: String::new(),
            echo_mode: EchoMode::Normal,
            cursor: 0,
            focus: false,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    /// Give this input keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Cursor position in chars, clamped to the bound value.
    pub fn cursor_position(&self, value: &str) -> usize {
        self.cursor.min(value.chars().count())
    }

    fn emit(&self, chars: &[char]) -> Command<Message> {
        Command::message(Message::Changed(ChangeEvent::Text {
            name: self.name.clone(),
            value: chars.iter().collect(),
        }))
    }

    fn handle_key(&mut self, key: KeyEvent, value: &str) -> Command<Message> {
        let mut chars: Vec<char> = value.chars().collect();
        let cursor = self.cursor.min(chars.len());
        self.cursor = cursor;

        match (key.code, key.modifiers) {
            (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
                Command::none()
            }
            (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.cursor = chars.len();
                Command::none()
            }
            (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) => {
                if cursor == 0 {
                    return Command::none();
                }
                chars.drain(..cursor);
                self.cursor = 0;
                self.emit(&chars)
            }
            (KeyCode::Char('k'), m) if m.contains(KeyModifiers::CONTROL) => {
                if cursor == chars.len() {
                    return Command::none();
                }
                chars.truncate(cursor);
                self.emit(&chars)
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                chars.insert(cursor, c);
                self.cursor = cursor + 1;
                self.emit(&chars)
            }
            (KeyCode::Backspace, _) => {
                if cursor == 0 {
                    return Command::none();
                }
                chars.remove(cursor - 1);
                self.cursor = cursor - 1;
                self.emit(&chars)
            }
            (KeyCode::Delete, _) => {
                if cursor >= chars.len() {
                    return Command::none();
                }
                chars.remove(cursor);
                self.emit(&chars)
            }
            (KeyCode::Left, _) => {
                self.cursor = cursor.saturating_sub(1);
                Command::none()
            }
            (KeyCode::Right, _) => {
                self.cursor = (cursor + 1).min(chars.len());
                Command::none()
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                Command::none()
            }
            (KeyCode::End, _) => {
                self.cursor = chars.len();
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn handle_paste(&mut self, text: &str, value: &str) -> Command<Message> {
        let pasted = runeutil::sanitize(text, false);
        if pasted.is_empty() {
            return Command::none();
        }
        let mut chars: Vec<char> = value.chars().collect();
        let cursor = self.cursor.min(chars.len());
        chars.splice(cursor..cursor, pasted.iter().copied());
        self.cursor = cursor + pasted.len();
        self.emit(&chars)
    }

    fn display_chars(&self, value: &str) -> Vec<char> {
        match self.echo_mode {
            EchoMode::Normal => value.chars().collect(),
            EchoMode::Password(mask) => vec![mask; value.chars().count()],
        }
    }
}

/// First char index to draw so that `cursor` (plus one cell for the cursor
/// itself) fits in `width` columns.
fn scroll_offset(chars: &[char], cursor: usize, width: usize) -> usize {
    let mut used = 1;
    let mut start = cursor;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}

impl Component for TextInput {
    type Message = Message;
    type Value = str;

    fn update(&mut self, msg: Message, value: &str) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key, value),
            Message::Paste(text) if self.focus => self.handle_paste(&text, value),
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, str>) {
        let area = chrome::split_error(frame, area, props.error);
        let block = chrome::focus_block(&self.label, self.focus, props.error.is_some());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chars = self.display_chars(props.value);
        let text_style = Style::default();
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

        let line = if chars.is_empty() && !self.focus {
            Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ))
        } else if self.focus {
            let cursor = self.cursor.min(chars.len());
            let start = scroll_offset(&chars, cursor, inner.width as usize);
            let before: String = chars[start..cursor].iter().collect();
            let at = chars.get(cursor).map_or(" ".to_string(), |c| c.to_string());
            let after: String = chars.iter().skip(cursor + 1).collect();
            Line::from(vec![
                Span::styled(before, text_style),
                Span::styled(at, cursor_style),
                Span::styled(after, text_style),
            ])
        } else {
            Line::from(Span::styled(chars.iter().collect::<String>(), text_style))
        };

        frame.render_widget(Paragraph::new(line), inner);
    }

    fn height(&self, props: Props<'_, str>) -> u16 {
        3 + chrome::error_rows(props.error)
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn key_ctrl(c: char) -> Message {
        Message::KeyPress(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn changed(cmd: Command<Message>) -> Option<String> {
        match cmd.into_message()? {
            Message::Changed(ChangeEvent::Text { value, .. }) => Some(value),
            _ => None,
        }
    }

    fn focused_input() -> TextInput {
        let mut input = TextInput::new("email");
        input.focus();
        input
    }

    #[test]
    fn typing_emits_whole_value() {
        let mut input = focused_input();
        input.cursor = 2;
        let cmd = input.update(key(KeyCode::Char('c')), "ab");
        assert_eq!(changed(cmd).as_deref(), Some("abc"));
        assert_eq!(input.cursor_position("abc"), 3);
    }

    #[test]
    fn change_event_carries_field_name() {
        let mut input = focused_input();
        let cmd = input.update(key(KeyCode::Char('x')), "");
        match cmd.into_message() {
            Some(Message::Changed(ev)) => assert_eq!(ev.name(), "email"),
            other => panic!("expected change, got {other:?}"),
        }
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut input = TextInput::new("email");
        assert!(input.update(key(KeyCode::Char('a')), "").is_none());
        assert!(input.update(Message::Paste("x".into()), "").is_none());
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = focused_input();
        input.cursor = 2;
        assert_eq!(changed(input.update(key(KeyCode::Backspace), "abc")).as_deref(), Some("ac"));
        assert_eq!(input.cursor_position("ac"), 1);
        assert_eq!(changed(input.update(key(KeyCode::Delete), "ac")).as_deref(), Some("a"));
        input.cursor = 0;
        assert!(input.update(key(KeyCode::Backspace), "a").is_none());
    }

    #[test]
    fn cursor_is_clamped_to_bound_value() {
        let mut input = focused_input();
        input.cursor = 10;
        assert_eq!(input.cursor_position("abc"), 3);
        let cmd = input.update(key(KeyCode::Char('!')), "abc");
        assert_eq!(changed(cmd).as_deref(), Some("abc!"));
    }

    #[test]
    fn ctrl_u_and_ctrl_k() {
        let mut input = focused_input();
        input.cursor = 2;
        assert_eq!(changed(input.update(key_ctrl('k'), "abcd")).as_deref(), Some("ab"));
        input.cursor = 1;
        assert_eq!(changed(input.update(key_ctrl('u'), "ab")).as_deref(), Some("b"));
        assert_eq!(input.cursor_position("b"), 0);
    }

    #[test]
    fn movement_keys_do_not_emit() {
        let mut input = focused_input();
        assert!(input.update(key(KeyCode::End), "abc").is_none());
        assert_eq!(input.cursor_position("abc"), 3);
        assert!(input.update(key(KeyCode::Left), "abc").is_none());
        assert_eq!(input.cursor_position("abc"), 2);
        assert!(input.update(key(KeyCode::Home), "abc").is_none());
        assert_eq!(input.cursor_position("abc"), 0);
    }

    #[test]
    fn paste_strips_newlines() {
        let mut input = focused_input();
        let cmd = input.update(Message::Paste("a@b\n.co".into()), "");
        assert_eq!(changed(cmd).as_deref(), Some("a@b.co"));
        assert_eq!(input.cursor_position("a@b.co"), 6);
    }

    #[test]
    fn paste_drops_tabs_and_escapes() {
        let mut input = focused_input();
        let cmd = input.update(Message::Paste("\tada@x.io\x1b\x07".into()), "");
        assert_eq!(changed(cmd).as_deref(), Some("ada@x.io"));

        let mut input = focused_input();
        assert!(input.update(Message::Paste("\t\r\n".into()), "").is_none());
    }

    #[test]
    fn password_is_masked_when_rendered() {
        let input = TextInput::new("password")
            .with_label(Label::new("Password"))
            .with_echo_mode(EchoMode::Password('•'));
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|f| input.view(f, f.area(), Props::new("hunter22")))
            .unwrap();
        let buf = terminal.backend().buffer();
        let row: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("••••••••"));
        assert!(!row.contains("hunter22"));
    }

    #[test]
    fn error_adds_a_row() {
        let input = TextInput::new("email");
        assert_eq!(input.height(Props::new("")), 3);
        assert_eq!(
            input.height(Props::new("").with_error(Some("Email is required"))),
            4
        );
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        let chars: Vec<char> = "abcdefghij".chars().collect();
        assert_eq!(scroll_offset(&chars, 10, 5), 6);
        assert_eq!(scroll_offset(&chars, 2, 5), 0);
    }
}
