//! # City Picker Component
//!
//! Dropdown over the popular cities. Picking the city that is already
//! selected clears the selection instead of selecting it again.
//!
//! The picker never remembers what was picked. The current city is a prop
//! (the submitted search criteria own it).

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::catalog::City;
use crate::tui::component::Component;
use crate::tui::components::dropdown::{Dropdown, DropdownEvent, DropdownState};
use crate::tui::event::TuiEvent;

/// Events emitted by the city picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityPickerEvent {
    /// `None` means the selection was cleared.
    Picked(Option<String>),
    Dismissed,
}

/// What a pick resolves to given the current selection.
pub fn resolve_pick(current: Option<&str>, picked: &str) -> Option<String> {
    match current {
        Some(c) if c.trim().eq_ignore_ascii_case(picked) => None,
        _ => Some(picked.to_string()),
    }
}

pub struct CityPickerState {
    pub dropdown: DropdownState<City>,
}

impl CityPickerState {
    pub fn new(cities: &[City]) -> Self {
        Self {
            dropdown: DropdownState::new(cities.to_vec()),
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, current: Option<&str>) -> Option<CityPickerEvent> {
        match self.dropdown.handle_event(event)? {
            DropdownEvent::Commit(city) => Some(CityPickerEvent::Picked(resolve_pick(current, city.name))),
            DropdownEvent::Dismissed => Some(CityPickerEvent::Dismissed),
        }
    }
}

/// Transient render wrapper for the city picker.
pub struct CityPicker<'a> {
    state: &'a mut CityPickerState,
    current: Option<&'a str>,
    focused: bool,
}

impl<'a> CityPicker<'a> {
    pub fn new(state: &'a mut CityPickerState, current: Option<&'a str>, focused: bool) -> Self {
        Self { state, current, focused }
    }

    fn dropdown(&mut self) -> Dropdown<'_, City> {
        let current = self.current.filter(|c| !c.is_empty());
        let selected = current.and_then(|c| {
            self.state
                .dropdown
                .choices()
                .iter()
                .position(|city| city.name.eq_ignore_ascii_case(c))
        });
        Dropdown::new(&mut self.state.dropdown, "City", |c: &City| c.name.to_string())
            .value(current.map(str::to_string))
            .placeholder("Any city")
            .empty_text("No cities available")
            .focused(self.focused)
            .selected(selected)
    }

    pub fn render_popup(&mut self, frame: &mut Frame) {
        self.dropdown().render_popup(frame);
    }
}

impl Component for CityPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.dropdown().render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::POPULAR_CITIES;

    fn pick(state: &mut CityPickerState, index: usize, current: Option<&str>) -> Option<CityPickerEvent> {
        state.dropdown.open();
        for _ in 0..index {
            state.handle_event(&TuiEvent::CursorDown, current);
        }
        state.handle_event(&TuiEvent::Submit, current)
    }

    #[test]
    fn test_resolve_pick_toggles() {
        assert_eq!(resolve_pick(None, "Lisbon"), Some("Lisbon".to_string()));
        assert_eq!(resolve_pick(Some("Paris"), "Lisbon"), Some("Lisbon".to_string()));
        assert_eq!(resolve_pick(Some("Lisbon"), "Lisbon"), None);
        assert_eq!(resolve_pick(Some("lisbon"), "Lisbon"), None);
    }

    #[test]
    fn test_second_pick_of_same_city_clears() {
        let mut state = CityPickerState::new(POPULAR_CITIES);
        let first = pick(&mut state, 1, None);
        assert_eq!(first, Some(CityPickerEvent::Picked(Some("Lisbon".to_string()))));
        assert!(!state.dropdown.is_open());

        // Owner now holds "Lisbon" and passes it back in
        let second = pick(&mut state, 1, Some("Lisbon"));
        assert_eq!(second, Some(CityPickerEvent::Picked(None)));
    }

    #[test]
    fn test_escape_reports_dismissal() {
        let mut state = CityPickerState::new(POPULAR_CITIES);
        state.dropdown.open();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape, None),
            Some(CityPickerEvent::Dismissed)
        );
    }
}
