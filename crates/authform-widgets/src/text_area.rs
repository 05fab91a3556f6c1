//! Multi-line controlled text area with a hard character limit and a live
//! `current/max` counter.

use authform_core::{Command, Component, Props};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::change::ChangeEvent;
use crate::chrome::{self, Label};
use crate::runeutil;

/// Messages for the text area component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard event.
    KeyPress(KeyEvent),
    /// Insert text at the cursor, truncated to the remaining room.
    Paste(String),
    /// Emitted with the proposed new value after every edit.
    Changed(ChangeEvent),
}

/// A multi-line editor bound to a `str` owned by the parent.
///
/// One `max_length` drives both the counter in the bottom border and the
/// cutoff: characters typed at the limit are dropped.
pub struct TextArea {
    name: String,
    label: Label,
    placeholder: String,
    max_length: usize,
    rows: u16,
    cursor: usize,
    focus: bool,
}

impl TextArea {
    pub fn new(name: impl Into<String>, max_length: usize) -> Self {
        Self {
            name: name.into(),
            label: Label::default(),
            placeholder: String::new(),
            max_length,
            rows: 4,
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

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The counter text for a value, e.g. `12/500`.
    pub fn counter(&self, value: &str) -> String {
        format!("{}/{}", value.chars().count(), self.max_length)
    }

    fn emit(&self, chars: &[char]) -> Command<Message> {
        Command::message(Message::Changed(ChangeEvent::Text {
            name: self.name.clone(),
            value: chars.iter().collect(),
        }))
    }

    fn insert(&mut self, chars: &mut Vec<char>, cursor: usize, text: &[char]) -> Command<Message> {
        let room = self.max_length.saturating_sub(chars.len());
        let take = text.len().min(room);
        if take == 0 {
            return Command::none();
        }
        chars.splice(cursor..cursor, text[..take].iter().copied());
        self.cursor = cursor + take;
        self.emit(chars)
    }

    fn handle_key(&mut self, key: KeyEvent, value: &str) -> Command<Message> {
        let mut chars: Vec<char> = value.chars().collect();
        let cursor = self.cursor.min(chars.len());
        self.cursor = cursor;

        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert(&mut chars, cursor, &[c])
            }
            (KeyCode::Enter, _) => self.insert(&mut chars, cursor, &['\n']),
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
            (KeyCode::Up, _) => {
                let (row, col) = row_col(&chars, cursor);
                if row > 0 {
                    self.cursor = index_at(&chars, row - 1, col);
                }
                Command::none()
            }
            (KeyCode::Down, _) => {
                let (row, col) = row_col(&chars, cursor);
                self.cursor = index_at(&chars, row + 1, col);
                Command::none()
            }
            (KeyCode::Home, _) => {
                let (row, _) = row_col(&chars, cursor);
                self.cursor = index_at(&chars, row, 0);
                Command::none()
            }
            (KeyCode::End, _) => {
                let (row, _) = row_col(&chars, cursor);
                self.cursor = index_at(&chars, row, usize::MAX);
                Command::none()
            }
            _ => Command::none(),
        }
    }
}

/// Row and column of a char index.
fn row_col(chars: &[char], index: usize) -> (usize, usize) {
    let before = &chars[..index.min(chars.len())];
    let row = before.iter().filter(|c| **c == '\n').count();
    let col = before.iter().rev().take_while(|c| **c != '\n').count();
    (row, col)
}

/// Char index of `(row, col)`, clamping the column to the line length and
/// the row to the last line.
fn index_at(chars: &[char], row: usize, col: usize) -> usize {
    let mut start = 0;
    for _ in 0..row {
        match chars[start..].iter().position(|c| *c == '\n') {
            Some(nl) => start += nl + 1,
            None => return chars.len(),
        }
    }
    let line_len = chars[start..]
        .iter()
        .position(|c| *c == '\n')
        .unwrap_or(chars.len() - start);
    start + col.min(line_len)
}

impl Component for TextArea {
    type Message = Message;
    type Value = str;

    fn update(&mut self, msg: Message, value: &str) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key, value),
            Message::Paste(text) if self.focus => {
                let mut chars: Vec<char> = value.chars().collect();
                let cursor = self.cursor.min(chars.len());
                let pasted = runeutil::sanitize(&text, true);
                self.insert(&mut chars, cursor, &pasted)
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, str>) {
        let area = chrome::split_error(frame, area, props.error);
        let counter_style = if props.value.chars().count() >= self.max_length {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = chrome::focus_block(&self.label, self.focus, props.error.is_some())
            .title_bottom(Line::styled(self.counter(props.value), counter_style).right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.value.is_empty() && !self.focus {
            frame.render_widget(
                Paragraph::new(self.placeholder.clone()).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let chars: Vec<char> = props.value.chars().collect();
        let cursor = self.cursor.min(chars.len());
        let (cursor_row, cursor_col) = row_col(&chars, cursor);
        let height = inner.height as usize;
        let top = cursor_row.saturating_sub(height.saturating_sub(1));
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

        let lines: Vec<Line> = props
            .value
            .split('\n')
            .enumerate()
            .skip(top)
            .take(height)
            .map(|(row, text)| {
                if !self.focus || row != cursor_row {
                    return Line::raw(text.to_string());
                }
                let line: Vec<char> = text.chars().collect();
                let before: String = line[..cursor_col].iter().collect();
                let at = line.get(cursor_col).map_or(" ".to_string(), |c| c.to_string());
                let after: String = line.iter().skip(cursor_col + 1).collect();
                Line::from(vec![
                    Span::raw(before),
                    Span::styled(at, cursor_style),
                    Span::raw(after),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn height(&self, props: Props<'_, str>) -> u16 {
        self.rows + 2 + chrome::error_rows(props.error)
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
