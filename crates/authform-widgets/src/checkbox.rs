//! A single controlled checkbox.

use authform_core::{Command, Component, Props};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::change::ChangeEvent;
use crate::chrome::{self, Label};

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Emitted with the inverted bound state.
    Changed(ChangeEvent),
}

/// A `[x]` / `[ ]` checkbox bound to a `bool`.
pub struct Checkbox {
    name: String,
    label: Label,
    focus: bool,
}

impl Checkbox {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Label::default(),
            focus: false,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }
}

impl Component for Checkbox {
    type Message = Message;
    type Value = bool;

    fn update(&mut self, msg: Message, value: &bool) -> Command<Message> {
        match msg {
            Message::KeyPress(key)
                if self.focus && matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) =>
            {
                Command::message(Message::Changed(ChangeEvent::Bool {
                    name: self.name.clone(),
                    checked: !*value,
                }))
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, bool>) {
        let area = chrome::split_error(frame, area, props.error);
        let mark = if *props.value { "[x] " } else { "[ ] " };
        let mark_style = if self.focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let mut spans = vec![chrome::cursor_marker(self.focus), Span::styled(mark, mark_style)];
        spans.extend(self.label.line(self.focus).spans);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn height(&self, props: Props<'_, bool>) -> u16 {
        1 + chrome::error_rows(props.error)
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
