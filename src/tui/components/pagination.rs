//! # Pagination Bar
//!
//! `‹ Prev  1  …  4  [5]  6  …  9  Next ›`
//!
//! Stateless apart from the click targets recorded on the last render.
//! Hidden entirely when there is a single page.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::search::{PageLink, page_window};
use crate::tui::component::{Component, hit};
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct PaginationState {
    targets: Vec<(Rect, usize)>,
}

impl PaginationState {
    /// Page a click landed on, if any.
    pub fn handle_event(&self, event: &TuiEvent) -> Option<usize> {
        let (col, row) = event.click_position()?;
        self.targets
            .iter()
            .find(|(area, _)| hit(*area, col, row))
            .map(|(_, page)| *page)
    }
}

pub struct Pagination<'a> {
    state: &'a mut PaginationState,
    current: usize,
    total: usize,
}

impl<'a> Pagination<'a> {
    pub fn new(state: &'a mut PaginationState, current: usize, total: usize) -> Self {
        Self { state, current, total }
    }
}

impl Component for Pagination<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.targets.clear();
        if self.total <= 1 || area.height == 0 {
            return;
        }

        let enabled = Style::default().fg(Color::Cyan);
        let disabled = Style::default().fg(Color::DarkGray);
        let mut items: Vec<(String, Style, Option<usize>)> = Vec::new();

        let has_prev = self.current > 1;
        items.push((
            "‹ Prev".to_string(),
            if has_prev { enabled } else { disabled },
            has_prev.then(|| self.current - 1),
        ));
        for link in page_window(self.current, self.total) {
            match link {
                PageLink::Page(p) if p == self.current => items.push((
                    format!("[{p}]"),
                    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
                    None,
                )),
                PageLink::Page(p) => items.push((p.to_string(), enabled, Some(p))),
                PageLink::Gap => items.push(("…".to_string(), disabled, None)),
            }
        }
        let has_next = self.current < self.total;
        items.push((
            "Next ›".to_string(),
            if has_next { enabled } else { disabled },
            has_next.then(|| self.current + 1),
        ));

        let total_width: usize = items.iter().map(|(t, _, _)| t.width() + 2).sum();
        let start = area.x + (area.width.saturating_sub(total_width as u16)) / 2;

        let mut spans = Vec::new();
        let mut x = start;
        for (text, style, target) in items {
            let width = text.width() as u16;
            if let Some(page) = target {
                self.state.targets.push((Rect::new(x + 1, area.y, width, 1), page));
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x += width + 2;
        }
        let line_area = Rect::new(start, area.y, area.right().saturating_sub(start), 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
    }
}
