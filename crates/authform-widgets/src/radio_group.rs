//! A controlled radio group: one row per option, one shared field name.

use authform_core::{Command, Component, Props};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::change::ChangeEvent;
use crate::chrome::{self, Label};
use crate::option::SelectOption;

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Changed(ChangeEvent),
}

/// Radio buttons bound to a `str`. The selected row is whichever option's
/// value equals the bound value, so at most one row is ever marked.
pub struct RadioGroup {
    name: String,
    label: Label,
    options: &'static [SelectOption],
    highlight: usize,
    focus: bool,
}

impl RadioGroup {
    pub fn new(name: impl Into<String>, options: &'static [SelectOption]) -> Self {
        Self {
            name: name.into(),
            label: Label::default(),
            options,
            highlight: 0,
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

    pub fn highlighted(&self) -> Option<&SelectOption> {
        self.options.get(self.highlight)
    }
}

impl Component for RadioGroup {
    type Message = Message;
    type Value = str;

    fn update(&mut self, msg: Message, _value: &str) -> Command<Message> {
        let Message::KeyPress(key) = msg else {
            return Command::none();
        };
        if !self.focus || self.options.is_empty() {
            return Command::none();
        }
        let last = self.options.len() - 1;
        match key.code {
            KeyCode::Up | KeyCode::Left => {
                self.highlight = self.highlight.saturating_sub(1);
                Command::none()
            }
            KeyCode::Down | KeyCode::Right => {
                self.highlight = (self.highlight + 1).min(last);
                Command::none()
            }
            KeyCode::Char(' ') | KeyCode::Enter => match self.highlighted() {
                Some(option) => Command::message(Message::Changed(ChangeEvent::Text {
                    name: self.name.clone(),
                    value: option.value.to_string(),
                })),
                None => Command::none(),
            },
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, str>) {
        let area = chrome::split_error(frame, area, props.error);
        let area = chrome::split_label(frame, area, &self.label, self.focus);
        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let selected = option.value == props.value;
                let active = self.focus && i == self.highlight;
                let mark = if selected { "(•) " } else { "( ) " };
                let style = if active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    chrome::cursor_marker(active),
                    Span::styled(mark, style),
                    Span::styled(option.label, style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn height(&self, props: Props<'_, str>) -> u16 {
        self.label.rows() + self.options.len() as u16 + chrome::error_rows(props.error)
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
