//! # Results Component
//!
//! Card grid for the current page of search results.
//!
//! ```text
//! 42 results found                                   Page 1 of 2
//! ╭───────────────────╮╭───────────────────╮╭───────────────────╮
//! │City Museum 1      ││Old Town Square 2  ││Botanical Garden 3 │
//! │Barcelona          ││Lisbon             ││Prague             │
//! │★ 3.8  €           ││★ 4.5  €€          ││★ 4.0  €€€         │
//! ╰───────────────────╯╰───────────────────╯╰───────────────────╯
//!          ‹ Prev  [1]  2  Next ›
//! ```
//!
//! ## State Management
//!
//! The page items, count, and page numbers are props derived from `App` each
//! frame. The component keeps only the highlighted card, the grid scroll
//! offset, and the click targets from the last render.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::catalog::{Attraction, price_symbols};
use crate::tui::component::{Component, hit};
use crate::tui::components::pagination::{Pagination, PaginationState};
use crate::tui::event::TuiEvent;
use crate::tui::text::{rating_label, truncate};

/// Placeholder cards drawn while a search is in flight.
pub const SKELETON_CARDS: usize = 9;
const CARD_HEIGHT: u16 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsEvent {
    /// Open the detail page for a place id.
    Open(String),
    GoToPage(usize),
    /// Selection moved off the top of the grid.
    FocusForm,
}

#[derive(Debug, Default)]
pub struct ResultsState {
    selected: usize,
    row_offset: usize,
    columns: usize,
    visible_rows: usize,
    /// Place ids of the rendered page, in order.
    ids: Vec<String>,
    cards: Vec<(Rect, usize)>,
    page: usize,
    total_pages: usize,
    pagination: PaginationState,
}

impl ResultsState {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Back to the first card, e.g. after a new search or a page change.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.row_offset = 0;
    }

    fn move_selection(&mut self, delta: isize) -> Option<ResultsEvent> {
        if self.ids.is_empty() {
            return None;
        }
        let target = self.selected as isize + delta;
        if target < 0 {
            return Some(ResultsEvent::FocusForm);
        }
        self.selected = (target as usize).min(self.ids.len() - 1);
        self.keep_selection_visible();
        None
    }

    fn keep_selection_visible(&mut self) {
        let row = self.selected / self.columns.max(1);
        let visible = self.visible_rows.max(1);
        if row < self.row_offset {
            self.row_offset = row;
        } else if row >= self.row_offset + visible {
            self.row_offset = row + 1 - visible;
        }
    }

    fn go_to(&mut self, page: usize) -> Option<ResultsEvent> {
        (page >= 1 && page <= self.total_pages && page != self.page).then(|| {
            self.reset();
            ResultsEvent::GoToPage(page)
        })
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ResultsEvent> {
        if event.click_position().is_some() {
            if let Some(page) = self.pagination.handle_event(event) {
                return self.go_to(page);
            }
            let (col, row) = event.click_position()?;
            let (_, index) = self.cards.iter().find(|(area, _)| hit(*area, col, row))?;
            self.selected = *index;
            return self.ids.get(*index).cloned().map(ResultsEvent::Open);
        }

        let columns = self.columns.max(1) as isize;
        match event {
            TuiEvent::CursorLeft => self.move_selection(-1),
            TuiEvent::CursorRight => self.move_selection(1),
            TuiEvent::CursorUp => self.move_selection(-columns),
            TuiEvent::CursorDown => self.move_selection(columns),
            TuiEvent::ScrollUp => {
                self.row_offset = self.row_offset.saturating_sub(1);
                None
            }
            TuiEvent::ScrollDown => {
                let rows = self.ids.len().div_ceil(self.columns.max(1));
                let max_offset = rows.saturating_sub(self.visible_rows.max(1));
                self.row_offset = (self.row_offset + 1).min(max_offset);
                None
            }
            TuiEvent::PageUp => self.go_to(self.page.saturating_sub(1)),
            TuiEvent::PageDown => self.go_to(self.page + 1),
            TuiEvent::Submit => self.ids.get(self.selected).cloned().map(ResultsEvent::Open),
            _ => None,
        }
    }
}

/// Transient render wrapper for the results grid.
pub struct Results<'a> {
    state: &'a mut ResultsState,
    items: &'a [&'a Attraction],
    count: usize,
    page: usize,
    total_pages: usize,
    loading: bool,
    is_narrow: bool,
    focused: bool,
}

impl<'a> Results<'a> {
    pub fn new(state: &'a mut ResultsState, items: &'a [&'a Attraction]) -> Self {
        Self {
            state,
            items,
            count: items.len(),
            page: 1,
            total_pages: 1,
            loading: false,
            is_narrow: false,
            focused: false,
        }
    }

    /// Total matches across all pages.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn page(mut self, page: usize, total_pages: usize) -> Self {
        self.page = page;
        self.total_pages = total_pages;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn narrow(mut self, is_narrow: bool) -> Self {
        self.is_narrow = is_narrow;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn columns(&self, width: u16) -> usize {
        if self.is_narrow { 1 } else { usize::from(width / 30).clamp(1, 3) }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let left = if self.loading {
            Span::styled("Searching…", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                format!("{} results found", self.count),
                Style::default().add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(Paragraph::new(Line::from(left)), area);
        if !self.loading && !self.items.is_empty() {
            let right = format!("Page {} of {}", self.page, self.total_pages);
            frame.render_widget(
                Paragraph::new(right).right_aligned().style(Style::default().fg(Color::Gray)),
                area,
            );
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("No results found", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                "Try adjusting your search criteria",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), area);
    }

    fn card_slots(&self, area: Rect, columns: usize, count: usize, offset: usize) -> Vec<(Rect, usize)> {
        let card_width = area.width / columns as u16;
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        (offset * columns..count)
            .take_while(|i| i / columns < offset + visible_rows)
            .filter_map(|i| {
                let row = (i / columns - offset) as u16;
                let col = (i % columns) as u16;
                let rect = Rect::new(area.x + col * card_width, area.y + row * CARD_HEIGHT, card_width, CARD_HEIGHT)
                    .intersection(area);
                (!rect.is_empty()).then_some((rect, i))
            })
            .collect()
    }

    fn render_skeletons(&self, frame: &mut Frame, area: Rect, columns: usize) {
        let bar = Style::default().fg(Color::DarkGray);
        for (rect, _) in self.card_slots(area, columns, SKELETON_CARDS, 0) {
            let width = usize::from(rect.width.saturating_sub(2));
            let lines = vec![
                Line::styled("░".repeat(width * 2 / 3), bar),
                Line::styled("░".repeat(width / 3), bar),
                Line::styled("░".repeat(width / 4), bar),
            ];
            let block = Block::bordered().border_type(BorderType::Rounded).border_style(bar);
            frame.render_widget(Paragraph::new(lines).block(block), rect);
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, attraction: &Attraction, selected: bool) {
        let inner = usize::from(area.width.saturating_sub(2));
        let border = if selected && self.focused {
            Style::default().fg(Color::Yellow)
        } else if selected {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut meta = vec![Span::styled(rating_label(attraction.rating), Style::default().fg(Color::Yellow))];
        if let Some(price) = price_symbols(attraction.price_level, '€') {
            meta.push(Span::raw("  "));
            meta.push(Span::styled(price, Style::default().fg(Color::Green)));
        }
        let lines = vec![
            Line::styled(truncate(&attraction.name, inner), Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(truncate(&attraction.city, inner), Style::default().fg(Color::Gray)),
            Line::from(meta),
            Line::styled(truncate(attraction.cover_photo(), inner), Style::default().fg(Color::DarkGray)),
        ];
        let block = Block::bordered().border_type(BorderType::Rounded).border_style(border);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for Results<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let show_pagination = !self.loading && self.total_pages > 1;
        let [summary_area, grid_area, pagination_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(u16::from(show_pagination)),
        ])
        .areas(area);

        let columns = self.columns(grid_area.width);
        self.state.columns = columns;
        self.state.visible_rows = usize::from((grid_area.height / CARD_HEIGHT).max(1));
        self.state.page = self.page;
        self.state.cards.clear();
        // Skeletons only: nothing to open and no page to turn to
        if self.loading {
            self.state.total_pages = 1;
            self.state.ids.clear();
        } else {
            self.state.total_pages = self.total_pages;
            self.state.ids = self.items.iter().map(|a| a.place_id.clone()).collect();
        }

        self.render_summary(frame, summary_area);

        if self.loading {
            self.render_skeletons(frame, grid_area, columns);
        } else if self.items.is_empty() {
            self.render_empty(frame, grid_area);
        } else {
            // Page may have shrunk (new results, wider viewport)
            self.state.selected = self.state.selected.min(self.items.len() - 1);
            self.state.keep_selection_visible();
            let slots = self.card_slots(grid_area, columns, self.items.len(), self.state.row_offset);
            for (rect, index) in &slots {
                self.render_card(frame, *rect, self.items[*index], *index == self.state.selected);
            }
            self.state.cards = slots;
        }

        Pagination::new(&mut self.state.pagination, self.page, if show_pagination { self.total_pages } else { 1 })
            .render(frame, pagination_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::mock_catalog;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut ResultsState, items: &[&Attraction], count: usize, page: (usize, usize), loading: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(96, 30)).unwrap();
        terminal
            .draw(|f| {
                Results::new(state, items)
                    .count(count)
                    .page(page.0, page.1)
                    .loading(loading)
                    .focused(true)
                    .render(f, f.area());
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_summary_and_cards() {
        let catalog = mock_catalog();
        let items: Vec<&Attraction> = catalog.iter().take(30).collect();
        let mut state = ResultsState::default();
        let text = draw(&mut state, &items, 42, (1, 2), false);
        assert!(text.contains("42 results found"));
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("City Museum 1"));
        assert!(text.contains("★ 3.8"));
        assert!(text.contains("Next ›"));
    }

    #[test]
    fn test_loading_shows_skeletons_only() {
        let catalog = mock_catalog();
        let items: Vec<&Attraction> = catalog.iter().take(30).collect();
        let mut state = ResultsState::default();
        let text = draw(&mut state, &items, 42, (1, 2), true);
        assert!(text.contains("Searching…"));
        assert!(text.contains("░"));
        assert!(!text.contains("City Museum 1"));
        assert!(!text.contains("Next ›"));
    }

    #[test]
    fn test_loading_ignores_open_and_page_keys() {
        let catalog = mock_catalog();
        let items: Vec<&Attraction> = catalog.iter().take(30).collect();
        let mut state = ResultsState::default();
        draw(&mut state, &items, 42, (1, 2), true);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(state.handle_event(&TuiEvent::PageDown), None);
        assert_eq!(state.handle_event(&TuiEvent::CursorRight), None);

        // Settled render makes the page interactive again
        draw(&mut state, &items, 42, (1, 2), false);
        assert_eq!(state.handle_event(&TuiEvent::PageDown), Some(ResultsEvent::GoToPage(2)));
    }

    #[test]
    fn test_empty_state() {
        let mut state = ResultsState::default();
        let text = draw(&mut state, &[], 0, (1, 1), false);
        assert!(text.contains("0 results found"));
        assert!(text.contains("No results found"));
        assert!(text.contains("Try adjusting your search criteria"));
        assert!(!text.contains("Page 1 of 1"));
    }

    #[test]
    fn test_keyboard_selection_and_open() {
        let catalog = mock_catalog();
        let items: Vec<&Attraction> = catalog.iter().take(6).collect();
        let mut state = ResultsState::default();
        draw(&mut state, &items, 6, (1, 1), false);
        assert_eq!(state.columns, 3);

        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(state.selected(), 4);
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(ResultsEvent::Open("pl_5".to_string())));

        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.handle_event(&TuiEvent::CursorUp), Some(ResultsEvent::FocusForm));
    }

    #[test]
    fn test_click_card_opens_detail() {
        let catalog = mock_catalog();
        let items: Vec<&Attraction> = catalog.iter().take(3).collect();
        let mut state = ResultsState::default();
        draw(&mut state, &items, 3, (1, 1), false);
        let (rect, _) = state.cards[1];
        assert_eq!(
            state.handle_event(&TuiEvent::MouseClick(rect.x + 2, rect.y + 2)),
            Some(ResultsEvent::Open("pl_2".to_string()))
        );
    }

    #[test]
    fn test_page_keys_stay_in_range() {
        let catalog = mock_catalog();
        let items: Vec<&Attraction> = catalog.iter().skip(30).collect();
        let mut state = ResultsState::default();
        draw(&mut state, &items, 42, (2, 2), false);
        assert_eq!(state.handle_event(&TuiEvent::PageDown), None);
        assert_eq!(state.handle_event(&TuiEvent::PageUp), Some(ResultsEvent::GoToPage(1)));
    }
}
