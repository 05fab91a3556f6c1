//! A controlled group of checkboxes bound to a list of selected values.

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
    /// Emitted with the entire new membership list.
    Changed(ChangeEvent),
}

/// Toggle `value` in `selected`: append it if absent, remove it if present.
/// The order of the remaining entries is preserved.
pub fn toggle_membership(selected: &[String], value: &str) -> Vec<String> {
    if selected.iter().any(|s| s == value) {
        selected.iter().filter(|s| *s != value).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(value.to_string());
        next
    }
}

pub struct CheckboxGroup {
    name: String,
    label: Label,
    options: &'static [SelectOption],
    highlight: usize,
    focus: bool,
}

impl CheckboxGroup {
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
}

impl Component for CheckboxGroup {
    type Message = Message;
    type Value = [String];

    fn update(&mut self, msg: Message, value: &[String]) -> Command<Message> {
        let Message::KeyPress(key) = msg else {
            return Command::none();
        };
        if !self.focus || self.options.is_empty() {
            return Command::none();
        }
        match key.code {
            KeyCode::Up => {
                self.highlight = self.highlight.saturating_sub(1);
                Command::none()
            }
            KeyCode::Down => {
                self.highlight = (self.highlight + 1).min(self.options.len() - 1);
                Command::none()
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let option = &self.options[self.highlight.min(self.options.len() - 1)];
                Command::message(Message::Changed(ChangeEvent::Multi {
                    name: self.name.clone(),
                    values: toggle_membership(value, option.value),
                }))
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, [String]>) {
        let area = chrome::split_error(frame, area, props.error);
        let area = chrome::split_label(frame, area, &self.label, self.focus);
        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let checked = props.value.iter().any(|v| v == option.value);
                let active = self.focus && i == self.highlight;
                let style = if active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    chrome::cursor_marker(active),
                    Span::styled(if checked { "[x] " } else { "[ ] " }, style),
                    Span::styled(option.label, style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn height(&self, props: Props<'_, [String]>) -> u16 {
        self.label.rows() + self.options.len() as u16 + chrome::error_rows(props.error)
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    static INTERESTS: [SelectOption; 3] = [
        SelectOption::new("technology", "Technology"),
        SelectOption::new("music", "Music"),
        SelectOption::new("sports", "Sports"),
    ];

    fn press(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn membership_add_then_remove() {
        let start = vec!["technology".to_string()];
        let added = toggle_membership(&start, "music");
        assert_eq!(added, vec!["technology".to_string(), "music".to_string()]);
        assert_eq!(toggle_membership(&added, "music"), start);
    }

    #[test]
    fn removal_preserves_order() {
        let selected: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            toggle_membership(&selected, "b"),
            vec!["a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn space_emits_whole_array() {
        let mut group = CheckboxGroup::new("interests", &INTERESTS);
        group.focus();
        group.update(press(KeyCode::Down), &[]);
        let bound = vec!["technology".to_string()];
        match group.update(press(KeyCode::Char(' ')), &bound).into_message() {
            Some(Message::Changed(ev)) => assert_eq!(
                ev,
                ChangeEvent::Multi {
                    name: "interests".into(),
                    values: vec!["technology".into(), "music".into()],
                }
            ),
            other => panic!("expected change, got {other:?}"),
        }
    }
}
