//! # Add To Trip Component
//!
//! Button + dropdown on the detail page: "Choose a day for your visit".
//! Committing a day emits it once and closes; the owner records the stop.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::component::Component;
use crate::tui::components::date_picker::day_label;
use crate::tui::components::dropdown::{Dropdown, DropdownEvent, DropdownState};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToTripEvent {
    /// ISO date the attraction should be visited on.
    Pick(String),
    Dismissed,
}

pub struct AddToTripState {
    pub dropdown: DropdownState<String>,
}

impl AddToTripState {
    pub fn new(dates: Vec<String>) -> Self {
        Self {
            dropdown: DropdownState::new(dates),
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<AddToTripEvent> {
        match self.dropdown.handle_event(event)? {
            DropdownEvent::Commit(date) => Some(AddToTripEvent::Pick(date)),
            DropdownEvent::Dismissed => Some(AddToTripEvent::Dismissed),
        }
    }
}

/// Transient render wrapper.
pub struct AddToTrip<'a> {
    state: &'a mut AddToTripState,
    focused: bool,
}

impl<'a> AddToTrip<'a> {
    pub fn new(state: &'a mut AddToTripState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn dropdown(&mut self) -> Dropdown<'_, String> {
        Dropdown::new(&mut self.state.dropdown, "Choose a day for your visit", |iso: &String| {
            day_label(iso)
        })
        .placeholder("+ Add to trip")
        .empty_text("No dates available")
        .focused(self.focused)
    }

    pub fn render_popup(&mut self, frame: &mut Frame) {
        self.dropdown().render_popup(frame);
    }
}

impl Component for AddToTrip<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.dropdown().render(frame, area);
    }
}
