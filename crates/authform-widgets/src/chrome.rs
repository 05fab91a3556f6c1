//! Shared decoration for form controls: labels with a required marker,
//! focus-dependent borders, and the error line under each control.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Style for inline validation messages.
pub const ERROR_STYLE: Style = Style::new().fg(Color::Red);

/// A control's label, optionally marked as required.
#[derive(Debug, Clone, Default)]
pub struct Label {
    pub text: String,
    pub required: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Rows the label occupies when drawn as its own line.
    pub fn rows(&self) -> u16 {
        u16::from(!self.text.is_empty())
    }

    /// The label as a styled line, with ` *` appended when required.
    pub fn line(&self, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled(self.text.clone(), style)];
        if self.required {
            spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        Line::from(spans)
    }
}

/// Create a bordered block titled with `label`, cyan when focused and dark
/// gray otherwise. A control with an error gets a red border.
pub fn focus_block(label: &Label, focused: bool, has_error: bool) -> Block<'static> {
    let color = if has_error {
        Color::Red
    } else if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::new()
        .borders(Borders::ALL)
        .title(label.line(focused))
        .border_style(Style::default().fg(color))
}

/// Rows needed for an error line.
pub fn error_rows(error: Option<&str>) -> u16 {
    u16::from(error.is_some_and(|e| !e.is_empty()))
}

/// Draw the error (if any) on the last row of `area` and return the rows
/// above it.
pub fn split_error(frame: &mut Frame, area: Rect, error: Option<&str>) -> Rect {
    match error.filter(|e| !e.is_empty()) {
        Some(message) if area.height > 0 => {
            let row = Rect {
                y: area.bottom() - 1,
                height: 1,
                ..area
            };
            frame.render_widget(Paragraph::new(message.to_string()).style(ERROR_STYLE), row);
            Rect {
                height: area.height - 1,
                ..area
            }
        }
        _ => area,
    }
}

/// Draw the label line (if any) on the first row of `area` and return the
/// rows below it.
pub fn split_label(frame: &mut Frame, area: Rect, label: &Label, focused: bool) -> Rect {
    if label.rows() == 0 || area.height == 0 {
        return area;
    }
    let row = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(label.line(focused)), row);
    Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    }
}

/// Marker drawn in front of the highlighted row of a choice control.
pub fn cursor_marker(active: bool) -> Span<'static> {
    if active {
        Span::styled("▸ ", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_label_gets_marker() {
        let line = Label::new("Email").required(true).line(false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Email *");
    }

    #[test]
    fn empty_label_takes_no_rows() {
        assert_eq!(Label::default().rows(), 0);
        assert_eq!(Label::new("Bio").rows(), 1);
    }

    #[test]
    fn error_rows_ignore_empty() {
        assert_eq!(error_rows(None), 0);
        assert_eq!(error_rows(Some("")), 0);
        assert_eq!(error_rows(Some("Name is required")), 1);
    }
}
