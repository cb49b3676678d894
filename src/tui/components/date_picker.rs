//! # Date Picker Component
//!
//! Dropdown offering a run of consecutive days. Used for the start and end
//! fields of the search form; each field owns its own instance.

use chrono::{Days, NaiveDate};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::component::Component;
use crate::tui::components::dropdown::{Dropdown, DropdownEvent, DropdownState};
use crate::tui::event::TuiEvent;

/// How many days a date picker offers.
pub const DATE_PICKER_DAYS: u64 = 30;

/// `2025-09-01` → `Mon, Sep 1`. Strings that aren't ISO dates come back as-is.
pub fn day_label(iso: &str) -> String {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d")
        .map(|d| format_day(&d))
        .unwrap_or_else(|_| iso.to_string())
}

fn format_day(date: &NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// `count` consecutive days starting at `base`.
pub fn upcoming_days(base: NaiveDate, count: u64) -> Vec<NaiveDate> {
    (0..count).filter_map(|n| base.checked_add_days(Days::new(n))).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatePickerEvent {
    /// ISO `YYYY-MM-DD`.
    Picked(String),
    Dismissed,
}

pub struct DatePickerState {
    pub dropdown: DropdownState<NaiveDate>,
}

impl DatePickerState {
    pub fn new(base: NaiveDate) -> Self {
        Self {
            dropdown: DropdownState::new(upcoming_days(base, DATE_PICKER_DAYS)),
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<DatePickerEvent> {
        match self.dropdown.handle_event(event)? {
            DropdownEvent::Commit(date) => {
                Some(DatePickerEvent::Picked(date.format("%Y-%m-%d").to_string()))
            }
            DropdownEvent::Dismissed => Some(DatePickerEvent::Dismissed),
        }
    }
}

/// Transient render wrapper for a date picker.
pub struct DatePicker<'a> {
    state: &'a mut DatePickerState,
    label: &'a str,
    value: &'a str,
    focused: bool,
}

impl<'a> DatePicker<'a> {
    pub fn new(state: &'a mut DatePickerState, label: &'a str, value: &'a str, focused: bool) -> Self {
        Self { state, label, value, focused }
    }

    fn dropdown(&mut self) -> Dropdown<'_, NaiveDate> {
        let value = (!self.value.is_empty()).then(|| day_label(self.value));
        let selected = NaiveDate::parse_from_str(self.value, "%Y-%m-%d")
            .ok()
            .and_then(|d| self.state.dropdown.choices().iter().position(|c| *c == d));
        Dropdown::new(&mut self.state.dropdown, self.label, format_day)
            .value(value)
            .placeholder("Any date")
            .empty_text("No dates available")
            .focused(self.focused)
            .selected(selected)
    }

    pub fn render_popup(&mut self, frame: &mut Frame) {
        self.dropdown().render_popup(frame);
    }
}

impl Component for DatePicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.dropdown().render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label("2025-09-01"), "Mon, Sep 1");
        assert_eq!(day_label("2025-09-14"), "Sun, Sep 14");
        assert_eq!(day_label("next tuesday"), "next tuesday");
    }

    #[test]
    fn test_upcoming_days() {
        let days = upcoming_days(base(), 30);
        assert_eq!(days.len(), 30);
        assert_eq!(days[29], NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());
    }

    #[test]
    fn test_pick_emits_iso_date() {
        let mut state = DatePickerState::new(base());
        state.dropdown.open();
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(DatePickerEvent::Picked("2025-09-03".to_string()))
        );
        assert!(!state.dropdown.is_open());
    }
}
