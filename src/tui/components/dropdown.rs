//! # Dropdown Component
//!
//! The shared selection-widget pattern behind the city picker, the date
//! pickers, and "Add to trip".
//!
//! ```text
//!            activate (Enter / click trigger)
//!   Closed ──────────────────────────────────▶ Open
//!     ▲                                         │
//!     └──── outside click │ Esc │ commit ◀──────┘
//! ```
//!
//! Everything the Open state needs for dismissal and scrolling (highlight,
//! scroll window, popup bounds) lives in `Option<OpenState>`. Closing drops it,
//! so a closed dropdown has nothing listening for outside clicks and nothing
//! left over from the last time it was open.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DropdownState<T>` lives in `TuiState`, one per widget instance
//! - `Dropdown` is created each frame with borrowed state

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::component::{Component, hit};
use crate::tui::event::TuiEvent;

/// Most rows a popup shows before it starts scrolling.
pub const MAX_VISIBLE_CHOICES: usize = 6;
const POPUP_MIN_WIDTH: u16 = 24;

/// Whether the option list is clipped above and/or below the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollHints {
    pub above: bool,
    pub below: bool,
}

impl ScrollHints {
    pub fn compute(offset: usize, viewport: usize, content: usize) -> Self {
        Self {
            above: offset > 0 && content > 0,
            below: offset + viewport < content,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct OpenState {
    highlighted: usize,
    offset: usize,
    viewport: usize,
    popup: Rect,
    list: Rect,
}

/// Events emitted by a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent<T> {
    /// A choice was committed; the dropdown has closed.
    Commit(T),
    /// Closed without a choice (outside click or Esc).
    Dismissed,
}

/// Persistent state for one dropdown instance.
#[derive(Debug, Clone)]
pub struct DropdownState<T> {
    choices: Vec<T>,
    open: Option<OpenState>,
    trigger: Rect,
}

impl<T: Clone> DropdownState<T> {
    pub fn new(choices: Vec<T>) -> Self {
        Self {
            choices,
            open: None,
            trigger: Rect::default(),
        }
    }

    pub fn choices(&self) -> &[T] {
        &self.choices
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open(&mut self) {
        if self.open.is_none() {
            debug!("Dropdown opened ({} choices)", self.choices.len());
            self.open = Some(OpenState {
                viewport: self.choices.len().min(MAX_VISIBLE_CHOICES),
                ..Default::default()
            });
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn toggle(&mut self) {
        if self.is_open() { self.close() } else { self.open() }
    }

    /// Index of the highlighted choice while open.
    pub fn highlighted(&self) -> Option<usize> {
        self.open
            .as_ref()
            .filter(|_| !self.choices.is_empty())
            .map(|o| o.highlighted)
    }

    /// "More above / more below" for the current scroll window. `None` while closed.
    pub fn scroll_hints(&self) -> Option<ScrollHints> {
        self.open
            .as_ref()
            .map(|o| ScrollHints::compute(o.offset, o.viewport, self.choices.len()))
    }

    /// Bounds of the trigger as last rendered.
    pub fn trigger_area(&self) -> Rect {
        self.trigger
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<DropdownEvent<T>> {
        if let Some((col, row)) = event.click_position() {
            return self.handle_click(col, row);
        }
        self.open.as_ref()?;
        match event {
            TuiEvent::Escape => {
                self.close();
                Some(DropdownEvent::Dismissed)
            }
            TuiEvent::CursorUp => {
                self.move_highlight(-1);
                None
            }
            TuiEvent::CursorDown => {
                self.move_highlight(1);
                None
            }
            TuiEvent::PageUp => {
                self.move_highlight(-(self.viewport() as isize));
                None
            }
            TuiEvent::PageDown => {
                self.move_highlight(self.viewport() as isize);
                None
            }
            TuiEvent::ScrollUp => {
                self.scroll(-1);
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll(1);
                None
            }
            TuiEvent::Submit => self.highlighted().and_then(|idx| self.commit(idx)),
            _ => None,
        }
    }

    fn handle_click(&mut self, col: u16, row: u16) -> Option<DropdownEvent<T>> {
        if hit(self.trigger, col, row) {
            self.toggle();
            return None;
        }
        // Closed dropdowns don't watch the rest of the screen
        let open = self.open.as_ref()?;
        if hit(open.list, col, row) {
            let idx = open.offset + usize::from(row - open.list.y);
            return if idx < self.choices.len() { self.commit(idx) } else { None };
        }
        if hit(open.popup, col, row) {
            return None;
        }
        self.close();
        Some(DropdownEvent::Dismissed)
    }

    fn commit(&mut self, index: usize) -> Option<DropdownEvent<T>> {
        let choice = self.choices.get(index)?.clone();
        self.close();
        Some(DropdownEvent::Commit(choice))
    }

    fn viewport(&self) -> usize {
        self.open.as_ref().map_or(1, |o| o.viewport.max(1))
    }

    fn move_highlight(&mut self, delta: isize) {
        let len = self.choices.len();
        let viewport = self.viewport();
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if len == 0 {
            return;
        }
        open.highlighted = open.highlighted.saturating_add_signed(delta).min(len - 1);
        if open.highlighted < open.offset {
            open.offset = open.highlighted;
        } else if open.highlighted >= open.offset + viewport {
            open.offset = open.highlighted + 1 - viewport;
        }
    }

    fn scroll(&mut self, delta: isize) {
        let len = self.choices.len();
        let viewport = self.viewport();
        let Some(open) = self.open.as_mut() else {
            return;
        };
        let max_offset = len.saturating_sub(viewport);
        open.offset = open.offset.saturating_add_signed(delta).min(max_offset);
        if len > 0 {
            open.highlighted = open
                .highlighted
                .clamp(open.offset, (open.offset + viewport - 1).min(len - 1));
        }
    }
}

/// Transient render wrapper for a dropdown.
///
/// `render` draws the trigger; `render_popup` draws the open list and must be
/// called after everything it may overlap.
pub struct Dropdown<'a, T> {
    state: &'a mut DropdownState<T>,
    label: &'a str,
    value: Option<String>,
    placeholder: &'a str,
    empty_text: &'a str,
    focused: bool,
    selected: Option<usize>,
    format: fn(&T) -> String,
}

impl<'a, T: Clone> Dropdown<'a, T> {
    pub fn new(state: &'a mut DropdownState<T>, label: &'a str, format: fn(&T) -> String) -> Self {
        Self {
            state,
            label,
            value: None,
            placeholder: "Select…",
            empty_text: "Nothing to choose from",
            focused: false,
            selected: None,
            format,
        }
    }

    pub fn value(mut self, value: Option<String>) -> Self {
        self.value = value.filter(|v| !v.is_empty());
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn empty_text(mut self, empty_text: &'a str) -> Self {
        self.empty_text = empty_text;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Mark the choice that is currently picked by the owner.
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn render_popup(&mut self, frame: &mut Frame) {
        let len = self.state.choices.len();
        let trigger = self.state.trigger;
        let Some(open) = self.state.open.as_mut() else {
            return;
        };

        let screen = frame.area();
        let rows = len.clamp(1, MAX_VISIBLE_CHOICES) as u16;
        let width = trigger.width.max(POPUP_MIN_WIDTH).min(screen.width);
        let height = (rows + 2).min(screen.height);
        let x = trigger.x.min(screen.right().saturating_sub(width));
        // Below the trigger when it fits, above otherwise
        let y = if trigger.bottom() + height <= screen.bottom() {
            trigger.bottom()
        } else {
            trigger.y.saturating_sub(height)
        };
        let popup = Rect::new(x, y, width, height);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.label));

        if len == 0 {
            let empty = Paragraph::new(self.empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, popup);
            open.popup = popup;
            open.list = Rect::default();
            open.viewport = 0;
            open.offset = 0;
            return;
        }

        let list = block.inner(popup);
        // Terminal may have shrunk since the last frame
        open.viewport = usize::from(list.height).max(1);
        open.offset = open.offset.min(len.saturating_sub(open.viewport));
        open.popup = popup;
        open.list = list;

        let hints = ScrollHints::compute(open.offset, open.viewport, len);
        let mut block = block;
        if hints.above {
            block = block.title(Line::from(" ▲ more ").right_aligned());
        }
        if hints.below {
            block = block.title_bottom(Line::from(" ▼ more ").right_aligned());
        }
        frame.render_widget(block, popup);

        let visible = self.state.choices.iter().enumerate().skip(open.offset).take(open.viewport);
        for (row, (idx, choice)) in visible.enumerate() {
            let style = if idx == open.highlighted {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if Some(idx) == self.selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if Some(idx) == self.selected { "● " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, style),
                Span::styled((self.format)(choice), style),
            ]);
            let area = Rect::new(list.x, list.y + row as u16, list.width, 1);
            frame.render_widget(Paragraph::new(line).style(style), area);
        }
    }
}

impl<T: Clone> Component for Dropdown<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.trigger = area;

        let border = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let arrow = if self.state.is_open() { "▴" } else { "▾" };
        let text = match &self.value {
            Some(value) => Span::styled(value.clone(), Style::default().fg(Color::White)),
            None => Span::styled(self.placeholder, Style::default().fg(Color::DarkGray)),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(self.label)
            .title(Line::from(format!("{arrow} ")).right_aligned());
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
    }
}
