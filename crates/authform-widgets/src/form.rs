//! The form wrapper: owns the submit gesture and the submit button.
//!
//! A submit gesture is Enter while the submit button has focus, or Ctrl+S
//! anywhere. The wrapper always consumes it, so the focused control never
//! sees it, and only reports [`Intercept::Submit`] when the caller says the
//! form is valid. Validity itself is decided elsewhere.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// What the form wrapper did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercept {
    /// Not a submit gesture. Route the key to the focused control.
    Pass(KeyEvent),
    /// Submit gesture on a valid form. Run the submit handler.
    Submit,
    /// Submit gesture on an invalid form. Nothing runs.
    Blocked,
}

/// Stateless submit gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Form;

impl Form {
    /// Whether `key` is a submit gesture.
    pub fn is_submit_gesture(key: &KeyEvent, on_submit_button: bool) -> bool {
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Enter => on_submit_button && key.modifiers == KeyModifiers::NONE,
            _ => false,
        }
    }

    pub fn intercept(key: KeyEvent, on_submit_button: bool, is_valid: bool) -> Intercept {
        if !Self::is_submit_gesture(&key, on_submit_button) {
            Intercept::Pass(key)
        } else if is_valid {
            Intercept::Submit
        } else {
            Intercept::Blocked
        }
    }
}

/// The submit button, drawn enabled or disabled from the current validity.
#[derive(Debug, Clone)]
pub struct SubmitButton {
    label: String,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, focused: bool, enabled: bool) {
        let mut style = if enabled {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).bg(Color::Black)
        };
        if focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let text = if focused {
            format!("▸ {} ◂", self.label)
        } else {
            format!("  {}  ", self.label)
        };
        frame.render_widget(
            Paragraph::new(Line::styled(text, style)).alignment(Alignment::Center),
            area,
        );
    }
}
