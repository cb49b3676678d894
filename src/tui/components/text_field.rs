//! # TextField Component
//!
//! Single-line bordered input used by the search form and the Create Space
//! prompt. The buffer and cursor are internal state; the label and focus
//! are props.
//!
//! The cursor is a byte offset that always sits on a char boundary. The
//! visible window scrolls horizontally so the cursor stays on screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler, hit};
use crate::tui::event::TuiEvent;

/// Border (2) + one cell of padding either side.
const HORIZONTAL_OVERHEAD: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFieldEvent {
    Changed,
    Submit(String),
    /// The field was clicked and wants focus.
    Focus,
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[derive(Debug, Clone, Default)]
pub struct TextField {
    buffer: String,
    cursor: usize,
    label: String,
    placeholder: String,
    /// Only accept ASCII digits (party size).
    numeric: bool,
    pub focused: bool,
    area: Rect,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
        self.cursor = self.buffer.len();
    }

    fn accepts(&self, c: char) -> bool {
        !c.is_control() && (!self.numeric || c.is_ascii_digit())
    }

    fn insert(&mut self, text: &str) -> bool {
        let accepted: String = text.chars().filter(|c| self.accepts(*c)).collect();
        if accepted.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.cursor, &accepted);
        self.cursor += accepted.len();
        true
    }

    /// Byte offset of the first visible char so the cursor fits in `width` cells.
    fn scroll_start(&self, width: usize) -> usize {
        if width == 0 {
            return self.cursor;
        }
        let mut start = 0;
        while self.buffer[start..self.cursor].width() >= width {
            start = next_char_boundary(&self.buffer, start);
        }
        start
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.area = area;
        let border = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(self.label.as_str());

        let width = usize::from(area.width.saturating_sub(HORIZONTAL_OVERHEAD));
        let start = self.scroll_start(width);
        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(format!(" {}", self.placeholder)).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(format!(" {}", &self.buffer[start..])).style(Style::default().fg(Color::White))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            let col = self.buffer[start..self.cursor].width() as u16;
            frame.set_cursor_position((area.x + 2 + col, area.y + 1));
        }
    }
}

impl EventHandler for TextField {
    type Event = TextFieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if let Some((col, row)) = event.click_position() {
            return hit(self.area, col, row).then_some(TextFieldEvent::Focus);
        }
        if !self.focused {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => self
                .insert(c.encode_utf8(&mut [0; 4]))
                .then_some(TextFieldEvent::Changed),
            TuiEvent::Paste(text) => self.insert(text).then_some(TextFieldEvent::Changed),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                TextFieldEvent::Changed
            }),
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::Submit => Some(TextFieldEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn focused(label: &str) -> TextField {
        let mut field = TextField::new(label);
        field.focused = true;
        field
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = focused("Search");
        field.handle_event(&TuiEvent::InputChar('m'));
        field.handle_event(&TuiEvent::InputChar('u'));
        assert_eq!(field.value(), "mu");
        assert_eq!(field.handle_event(&TuiEvent::Backspace), Some(TextFieldEvent::Changed));
        assert_eq!(field.value(), "m");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = focused("City");
        field.handle_event(&TuiEvent::Paste("Malmö".to_string()));
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.value(), "Malö");
        field.handle_event(&TuiEvent::CursorRight);
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.value(), "Mal");
    }

    #[test]
    fn test_numeric_rejects_letters() {
        let mut field = focused("People").numeric();
        assert_eq!(field.handle_event(&TuiEvent::InputChar('x')), None);
        field.handle_event(&TuiEvent::Paste("1a2".to_string()));
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut field = TextField::new("Search");
        assert_eq!(field.handle_event(&TuiEvent::InputChar('a')), None);
        assert!(field.value().is_empty());
    }

    #[test]
    fn test_click_requests_focus() {
        let mut field = TextField::new("Search");
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal.draw(|f| field.render(f, f.area())).unwrap();
        assert_eq!(field.handle_event(&TuiEvent::MouseClick(3, 1)), Some(TextFieldEvent::Focus));
        assert_eq!(field.handle_event(&TuiEvent::MouseClick(3, 10)), None);
    }

    #[test]
    fn test_long_value_keeps_cursor_visible() {
        let mut field = focused("Search").with_value("a very long query that overflows");
        let mut terminal = Terminal::new(TestBackend::new(14, 3)).unwrap();
        terminal.draw(|f| field.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("overflows"));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut field = TextField::new("Search").with_placeholder("Search attractions");
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal.draw(|f| field.render(f, f.area())).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("Search attractions"));
    }
}
