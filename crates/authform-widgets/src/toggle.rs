//! A binary on/off switch.
//!
//! The toggle has no state of its own: activation reads the bound value and
//! emits its inverse in the checkbox shape, so the parent's single change
//! handler treats it exactly like a checkbox.

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
    Changed(ChangeEvent),
}

pub struct Toggle {
    name: String,
    label: Label,
    focus: bool,
}

impl Toggle {
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

fn switch(on: bool) -> Span<'static> {
    if on {
        Span::styled("(  ●) On ", Style::default().fg(Color::Green))
    } else {
        Span::styled("(●  ) Off", Style::default().fg(Color::DarkGray))
    }
}

impl Component for Toggle {
    type Message = Message;
    type Value = bool;

    fn update(&mut self, msg: Message, value: &bool) -> Command<Message> {
        let Message::KeyPress(key) = msg else {
            return Command::none();
        };
        if !self.focus {
            return Command::none();
        }
        // Space and Enter flip the switch; the arrows slide it to a side.
        let checked = match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => !*value,
            KeyCode::Left if *value => false,
            KeyCode::Right if !*value => true,
            _ => return Command::none(),
        };
        Command::message(Message::Changed(ChangeEvent::Bool {
            name: self.name.clone(),
            checked,
        }))
    }

    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, bool>) {
        let area = chrome::split_error(frame, area, props.error);
        let mut spans = vec![chrome::cursor_marker(self.focus), switch(*props.value), Span::raw("  ")];
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn press(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn emitted(toggle: &mut Toggle, code: KeyCode, bound: bool) -> Option<bool> {
        match toggle.update(press(code), &bound).into_message() {
            Some(Message::Changed(ChangeEvent::Bool { checked, .. })) => Some(checked),
            _ => None,
        }
    }

    #[test]
    fn activation_emits_inverted_bound_state() {
        let mut toggle = Toggle::new("rememberMe");
        toggle.focus();
        for code in [KeyCode::Char(' '), KeyCode::Enter] {
            for bound in [false, true] {
                match toggle.update(press(code), &bound).into_message() {
                    Some(Message::Changed(ev)) => assert_eq!(
                        ev,
                        ChangeEvent::Bool {
                            name: "rememberMe".into(),
                            checked: !bound
                        }
                    ),
                    other => panic!("expected change, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn arrows_slide_to_a_side() {
        let mut toggle = Toggle::new("rememberMe");
        toggle.focus();
        assert_eq!(emitted(&mut toggle, KeyCode::Right, false), Some(true));
        assert_eq!(emitted(&mut toggle, KeyCode::Right, true), None);
        assert_eq!(emitted(&mut toggle, KeyCode::Left, true), Some(false));
        assert_eq!(emitted(&mut toggle, KeyCode::Left, false), None);
    }

    #[test]
    fn renders_switch_state() {
        let toggle = Toggle::new("rememberMe").with_label(Label::new("Remember me"));
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        for (on, text) in [(false, "Off"), (true, "On")] {
            terminal
                .draw(|f| toggle.view(f, f.area(), Props::new(&on)))
                .unwrap();
            let buf = terminal.backend().buffer();
            let row: String = (0..40).map(|x| buf[(x, 0)].symbol().to_string()).collect();
            assert!(row.contains(text), "{row}");
            assert!(row.contains("Remember me"));
        }
    }
}
