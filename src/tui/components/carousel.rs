//! # Carousel Component
//!
//! Photo gallery on the detail page. Terminals can't show the images, so a
//! slide is the photo reference plus its position; dots mark the index.
//!
//! Left/Right wrap around. Enter opens the lightbox, Esc closes it, and
//! while it is open the arrows keep navigating.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::catalog::photo_or_placeholder;
use crate::tui::component::{Component, hit};
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct CarouselState {
    index: usize,
    lightbox: bool,
    area: Rect,
}

impl CarouselState {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.lightbox
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Returns `true` when the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent, len: usize) -> bool {
        if let Some((col, row)) = event.click_position() {
            if self.lightbox {
                // Any click dismisses the lightbox
                self.lightbox = false;
                return true;
            }
            if hit(self.area, col, row) {
                self.lightbox = true;
                return true;
            }
            return false;
        }
        match event {
            TuiEvent::CursorLeft => {
                self.prev(len);
                true
            }
            TuiEvent::CursorRight => {
                self.next(len);
                true
            }
            TuiEvent::Submit if !self.lightbox => {
                self.lightbox = true;
                true
            }
            TuiEvent::Escape if self.lightbox => {
                self.lightbox = false;
                true
            }
            _ => self.lightbox,
        }
    }
}

fn dots(index: usize, len: usize) -> Line<'static> {
    let spans: Vec<Span> = (0..len)
        .map(|i| {
            if i == index {
                Span::styled("● ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    Line::from(spans).alignment(Alignment::Center)
}

/// Transient render wrapper.
pub struct Carousel<'a> {
    state: &'a mut CarouselState,
    photos: &'a [String],
    focused: bool,
}

impl<'a> Carousel<'a> {
    pub fn new(state: &'a mut CarouselState, photos: &'a [String], focused: bool) -> Self {
        Self { state, photos, focused }
    }

    fn slide_lines(&self) -> Vec<Line<'static>> {
        let len = self.photos.len();
        // Photo list can change under a kept state
        let index = if len == 0 { 0 } else { self.state.index % len };
        let mut lines = vec![
            Line::from(""),
            Line::styled(
                photo_or_placeholder(self.photos, index).to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center),
        ];
        if len > 1 {
            lines.push(Line::from(""));
            lines.push(dots(index, len));
        }
        lines
    }

    fn title(&self) -> String {
        let len = self.photos.len();
        if len == 0 {
            " Photos ".to_string()
        } else {
            format!(" Photo {} of {} ", self.state.index % len + 1, len)
        }
    }

    /// Full-screen view. Call last so it covers everything.
    pub fn render_lightbox(&mut self, frame: &mut Frame) {
        if !self.state.lightbox {
            return;
        }
        let area = frame.area();
        frame.render_widget(Clear, area);
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Cyan))
            .title(self.title())
            .title_bottom(Line::from(" ← → browse · Esc close ").centered());
        let paragraph = Paragraph::new(self.slide_lines()).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(paragraph, area);
    }
}

impl Component for Carousel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.area = area;
        let border = if self.focused { Color::Yellow } else { Color::DarkGray };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(self.title());
        if self.photos.len() > 1 {
            block = block
                .title(Line::from(" ‹ ").left_aligned())
                .title(Line::from(" › ").right_aligned());
        }
        let paragraph = Paragraph::new(self.slide_lines()).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::PLACEHOLDER_PHOTO;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn photos() -> Vec<String> {
        vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()]
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut state = CarouselState::default();
        state.prev(3);
        assert_eq!(state.index(), 2);
        state.next(3);
        assert_eq!(state.index(), 0);
        state.next(0);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_lightbox_open_and_close() {
        let mut state = CarouselState::default();
        assert!(state.handle_event(&TuiEvent::Submit, 3));
        assert!(state.is_lightbox_open());
        assert!(state.handle_event(&TuiEvent::CursorRight, 3));
        assert_eq!(state.index(), 1);
        assert!(state.handle_event(&TuiEvent::Escape, 3));
        assert!(!state.is_lightbox_open());
        // Esc with the lightbox closed is left for the page
        assert!(!state.handle_event(&TuiEvent::Escape, 3));
    }

    #[test]
    fn test_render_position_and_dots() {
        let photos = photos();
        let mut state = CarouselState::default();
        state.next(3);
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|f| Carousel::new(&mut state, &photos, false).render(f, f.area()))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Photo 2 of 3"));
        assert!(text.contains("b.jpg"));
        assert!(text.contains("○ ● ○"));
    }

    #[test]
    fn test_empty_gallery_uses_placeholder() {
        let mut state = CarouselState::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal
            .draw(|f| Carousel::new(&mut state, &[], false).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains(PLACEHOLDER_PHOTO));
    }
}
