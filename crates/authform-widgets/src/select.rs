//! Searchable select: a trigger box that opens a popover list of options,
//! optionally filtered by a search string typed while it is open.
//!
//! The popover is drawn by [`SearchableSelect::view_popover`] in a separate
//! pass after every other control, so it paints over whatever lies below
//! the trigger. Both rectangles are recorded at render time and used to
//! hit-test pointer events: a pointer-down outside them closes the popover.

use std::cell::Cell;

use authform_core::{pointer_down, Command, Component, Props, Subscription};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::change::ChangeEvent;
use crate::chrome::{self, Label};
use crate::option::{label_for, SelectOption};

/// Text of the placeholder row shown when the search matches nothing.
pub const NO_OPTIONS: &str = "No options found";

const MAX_VISIBLE: usize = 6;

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// A left-button press anywhere on screen, in terminal cells.
    PointerDown { column: u16, row: u16 },
    /// Emitted with the chosen option's value.
    Changed(ChangeEvent),
}

/// Options whose label contains `search`, ignoring case. An empty search
/// matches everything.
pub fn filter_options<'a>(options: &'a [SelectOption], search: &str) -> Vec<&'a SelectOption> {
    let needle = search.to_lowercase();
    options
        .iter()
        .filter(|o| o.label.to_lowercase().contains(&needle))
        .collect()
}

pub struct SearchableSelect {
    name: String,
    label: Label,
    placeholder: String,
    options: &'static [SelectOption],
    searchable: bool,
    open: bool,
    search: String,
    highlight: usize,
    focus: bool,
    trigger: Cell<Rect>,
    popover: Cell<Rect>,
}

impl SearchableSelect {
    pub fn new(name: impl Into<String>, options: &'static [SelectOption]) -> Self {
        Self {
            name: name.into(),
            label: Label::default(),
            placeholder: "Select...".to_string(),
            options,
            searchable: true,
            open: false,
            search: String::new(),
            highlight: 0,
            focus: false,
            trigger: Cell::new(Rect::default()),
            popover: Cell::new(Rect::default()),
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

    /// Enable or disable typing to filter (enabled by default).
    pub fn with_search(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove focus. An open popover is closed and its search cleared.
    pub fn blur(&mut self) {
        self.focus = false;
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Options currently listed in the popover.
    pub fn visible_options(&self) -> Vec<&'static SelectOption> {
        if self.searchable {
            filter_options(self.options, &self.search)
        } else {
            self.options.iter().collect()
        }
    }

    /// Forget the recorded trigger and popover rectangles, for a select that
    /// is mounted but was not drawn this frame.
    pub fn clear_bounds(&self) {
        self.trigger.set(Rect::default());
        self.popover.set(Rect::default());
    }

    fn open(&mut self, value: &str) {
        self.open = true;
        self.search.clear();
        self.highlight = self
            .visible_options()
            .iter()
            .position(|o| o.value == value)
            .unwrap_or(0);
    }

    fn close(&mut self) {
        self.open = false;
        self.search.clear();
        self.highlight = 0;
        self.popover.set(Rect::default());
    }

    fn choose(&mut self, option: &SelectOption) -> Command<Message> {
        self.close();
        Command::message(Message::Changed(ChangeEvent::Text {
            name: self.name.clone(),
            value: option.value.to_string(),
        }))
    }

    fn list_offset(&self) -> usize {
        self.highlight.saturating_sub(MAX_VISIBLE - 1)
    }

    fn popover_height(&self) -> u16 {
        let rows = self.visible_options().len().clamp(1, MAX_VISIBLE) as u16;
        rows + u16::from(self.searchable) + 2
    }

    fn handle_key(&mut self, key: KeyEvent, value: &str) -> Command<Message> {
        if !self.open {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                self.open(value);
            }
            return Command::none();
        }

        let count = self.visible_options().len();
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.close();
                Command::none()
            }
            (KeyCode::Up, _) => {
                self.highlight = self.highlight.saturating_sub(1);
                Command::none()
            }
            (KeyCode::Down, _) => {
                if count > 0 {
                    self.highlight = (self.highlight + 1).min(count - 1);
                }
                Command::none()
            }
            (KeyCode::Enter, _) => match self.visible_options().get(self.highlight).copied() {
                Some(option) => self.choose(option),
                None => Command::none(),
            },
            (KeyCode::Char(' '), _) if !self.searchable => {
                self.close();
                Command::none()
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) if self.searchable => {
                self.search.push(c);
                self.highlight = 0;
                Command::none()
            }
            (KeyCode::Backspace, _) if self.searchable => {
                self.search.pop();
                self.highlight = 0;
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn handle_pointer(&mut self, column: u16, row: u16, value: &str) -> Command<Message> {
        let pos = Position::new(column, row);
        if self.trigger.get().contains(pos) {
            if self.open {
                self.close();
            } else {
                self.open(value);
            }
            return Command::none();
        }
        if !self.open {
            return Command::none();
        }

        let popover = self.popover.get();
        if !popover.contains(pos) {
            self.close();
            return Command::none();
        }

        let first_row = popover.y + 1 + u16::from(self.searchable);
        if row < first_row || row >= popover.bottom().saturating_sub(1) {
            return Command::none();
        }
        let index = self.list_offset() + usize::from(row - first_row);
        match self.visible_options().get(index).copied() {
            Some(option) => self.choose(option),
            None => Command::none(),
        }
    }

    /// Draw the popover list. Call after every other control has been drawn.
    /// Does nothing while closed.
    pub fn view_popover(&self, frame: &mut Frame) {
        if !self.open {
            return;
        }
        let trigger = self.trigger.get();
        if trigger.is_empty() {
            return;
        }
        let bounds = frame.area();
        let height = self.popover_height();
        let below = bounds.bottom().saturating_sub(trigger.bottom());
        let y = if below >= height || trigger.y.saturating_sub(bounds.y) < height {
            trigger.bottom()
        } else {
            trigger.y - height
        };
        let area = Rect::new(trigger.x, y, trigger.width, height).intersection(bounds);
        self.popover.set(area);
        if area.is_empty() {
            return;
        }

        frame.render_widget(Clear, area);
        let block = Block::new()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        if self.searchable {
            lines.push(Line::from(vec![
                Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.search.clone()),
                Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
            ]));
        }

        let options = self.visible_options();
        if options.is_empty() {
            lines.push(Line::styled(
                format!("  {NO_OPTIONS}"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        let offset = self.list_offset();
        for (i, option) in options.iter().enumerate().skip(offset).take(MAX_VISIBLE) {
            let active = i == self.highlight;
            let style = if active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                chrome::cursor_marker(active),
                Span::styled(option.label, style),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for SearchableSelect {
    type Message = Message;
    type Value = str;

    fn update(&mut self, msg: Message, value: &str) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key, value),
            Message::PointerDown { column, row } => self.handle_pointer(column, row, value),
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, props: Props<'_, str>) {
        let area = chrome::split_error(frame, area, props.error);
        self.trigger.set(area);

        let block = chrome::focus_block(&self.label, self.focus, props.error.is_some());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let arrow = if self.open { "▴" } else { "▾" };
        let (text, style) = match label_for(self.options, props.value) {
            Some(label) => (label, Style::default()),
            None => (self.placeholder.as_str(), Style::default().fg(Color::DarkGray)),
        };
        let pad = (inner.width as usize)
            .saturating_sub(2)
            .saturating_sub(text.chars().count());
        let line = Line::from(vec![
            Span::styled(text.to_string(), style),
            Span::raw(" ".repeat(pad)),
            Span::styled(format!(" {arrow}"), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn height(&self, props: Props<'_, str>) -> u16 {
        3 + chrome::error_rows(props.error)
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        vec![pointer_down(&self.name, |column, row| {
            Some(Message::PointerDown { column, row })
        })]
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authform_core::InputEvent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    static ROLES: [SelectOption; 3] = [
        SelectOption::new("user", "User"),
        SelectOption::new("admin", "Administrator"),
        SelectOption::new("editor", "Editor"),
    ];

    fn press(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn chosen(cmd: Command<Message>) -> Option<String> {
        match cmd.into_message()? {
            Message::Changed(ChangeEvent::Text { value, .. }) => Some(value),
            _ => None,
        }
    }

    fn open_role() -> SearchableSelect {
        let mut select = SearchableSelect::new("role", &ROLES);
        select.focus();
        select.update(press(KeyCode::Enter), "user");
        assert!(select.is_open());
        select
    }

    fn draw(select: &SearchableSelect, value: &str) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(30, 14)).unwrap();
        terminal
            .draw(|f| {
                select.view(f, Rect::new(0, 0, 30, 3), Props::new(value));
                select.view_popover(f);
            })
            .unwrap();
        terminal
    }

    #[test]
    fn filter_matches_label_substring_ignoring_case() {
        let found: Vec<&str> = filter_options(&ROLES, "admin").iter().map(|o| o.label).collect();
        assert_eq!(found, vec!["Administrator"]);
        assert_eq!(filter_options(&ROLES, "DIT").len(), 1);
        assert_eq!(filter_options(&ROLES, "").len(), 3);
        assert!(filter_options(&ROLES, "zzz").is_empty());
    }

    #[test]
    fn typing_filters_and_enter_chooses() {
        let mut select = open_role();
        for c in "admin".chars() {
            select.update(press(KeyCode::Char(c)), "user");
        }
        assert_eq!(select.search(), "admin");
        let labels: Vec<&str> = select.visible_options().iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Administrator"]);

        let cmd = select.update(press(KeyCode::Enter), "user");
        assert_eq!(chosen(cmd).as_deref(), Some("admin"));
        assert!(!select.is_open());
        assert_eq!(select.search(), "");
    }

    #[test]
    fn unmatched_search_shows_placeholder_and_nothing_selectable() {
        let mut select = open_role();
        for c in "zzz".chars() {
            select.update(press(KeyCode::Char(c)), "user");
        }
        assert!(select.visible_options().is_empty());
        assert!(select.update(press(KeyCode::Enter), "user").is_none());
        assert!(select.is_open());

        let terminal = draw(&select, "user");
        let buf = terminal.backend().buffer();
        let screen: String = (0..14)
            .flat_map(|y| (0..30).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(screen.contains(NO_OPTIONS));
    }

    #[test]
    fn escape_closes_and_clears_search() {
        let mut select = open_role();
        select.update(press(KeyCode::Char('e')), "user");
        select.update(press(KeyCode::Esc), "user");
        assert!(!select.is_open());
        assert_eq!(select.search(), "");
    }

    #[test]
    fn non_searchable_ignores_typing() {
        let mut select = SearchableSelect::new("marketingPreferences", &ROLES).with_search(false);
        select.focus();
        select.update(press(KeyCode::Enter), "");
        select.update(press(KeyCode::Char('x')), "");
        assert_eq!(select.search(), "");
        assert_eq!(select.visible_options().len(), 3);
    }

    #[test]
    fn open_highlights_current_value() {
        let mut select = SearchableSelect::new("role", &ROLES);
        select.focus();
        select.update(press(KeyCode::Enter), "editor");
        let cmd = select.update(press(KeyCode::Enter), "editor");
        assert_eq!(chosen(cmd).as_deref(), Some("editor"));
    }

    #[test]
    fn outside_pointer_down_closes() {
        let mut select = open_role();
        let _terminal = draw(&select, "user");
        select.update(Message::PointerDown { column: 29, row: 13 }, "user");
        assert!(!select.is_open());
    }

    #[test]
    fn pointer_on_trigger_toggles_and_on_row_selects() {
        let mut select = SearchableSelect::new("role", &ROLES);
        let _ = draw(&select, "user");
        select.update(Message::PointerDown { column: 5, row: 1 }, "user");
        assert!(select.is_open());

        // Popover sits below the trigger: border, search line, then rows.
        let _ = draw(&select, "user");
        let cmd = select.update(Message::PointerDown { column: 5, row: 6 }, "user");
        assert_eq!(chosen(cmd).as_deref(), Some("admin"));
        assert!(!select.is_open());
    }

    #[test]
    fn pointer_after_clear_bounds_is_ignored() {
        let mut select = SearchableSelect::new("role", &ROLES);
        let _ = draw(&select, "user");
        select.clear_bounds();
        select.update(Message::PointerDown { column: 5, row: 1 }, "user");
        assert!(!select.is_open());
    }

    #[test]
    fn subscription_is_keyed_by_instance_name() {
        let role = SearchableSelect::new("role", &ROLES);
        let other = SearchableSelect::new("marketingPreferences", &ROLES);
        let a = role.subscriptions();
        let b = other.subscriptions();
        assert_eq!(a.len(), 1);
        assert_ne!(a[0].id(), b[0].id());
        assert!(matches!(
            a[0].deliver(&InputEvent::PointerDown { column: 1, row: 2 }),
            Some(Message::PointerDown { column: 1, row: 2 })
        ));
    }
}
