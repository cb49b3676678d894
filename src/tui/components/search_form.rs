//! # Search Form Component
//!
//! Query, city, start/end dates, and party size, plus a Search button.
//!
//! ```text
//! ╭ Search attractions ─────────────────────────────────────────────╮
//! ╰─────────────────────────────────────────────────────────────────╯
//! ╭ City ──────▾╮╭ Start ─────▾╮╭ End ───────▾╮╭ People ─╮[ Search ]
//! ```
//!
//! Text and dates are form-local until submitted. The city is different: a
//! pick resubmits immediately, so the picker reads the submitted city as a
//! prop and the form only reports the pick.
//!
//! Each dropdown owns its open state. Clicks are offered to every picker so
//! an open one can notice a click outside it; keys go to the focused field.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::catalog::POPULAR_CITIES;
use crate::core::search::{SearchCriteria, parse_party_size};
use crate::tui::component::{Component, EventHandler, hit};
use crate::tui::components::city_picker::{CityPicker, CityPickerEvent, CityPickerState};
use crate::tui::components::date_picker::{DatePicker, DatePickerEvent, DatePickerState};
use crate::tui::components::text_field::{TextField, TextFieldEvent};
use crate::tui::event::TuiEvent;

/// Rows the form occupies.
pub const SEARCH_FORM_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Query,
    City,
    Start,
    End,
    People,
    Button,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Query,
        FormField::City,
        FormField::Start,
        FormField::End,
        FormField::People,
        FormField::Button,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFormEvent {
    Submit(SearchCriteria),
    /// `None` clears the city filter.
    PickCity(Option<String>),
}

pub struct SearchForm {
    query: TextField,
    people: TextField,
    city: CityPickerState,
    start: DatePickerState,
    end: DatePickerState,
    start_value: String,
    end_value: String,
    focus: FormField,
    button: Rect,
}

impl SearchForm {
    /// Prefill from the submitted criteria. `today` anchors the date pickers.
    pub fn new(criteria: &SearchCriteria, today: NaiveDate) -> Self {
        let mut form = Self {
            query: TextField::new("Search attractions")
                .with_placeholder("Museum, garden, gallery…")
                .with_value(criteria.query.clone()),
            people: TextField::new("People").numeric().with_value(criteria.people.to_string()),
            city: CityPickerState::new(POPULAR_CITIES),
            start: DatePickerState::new(today),
            end: DatePickerState::new(today),
            start_value: criteria.start.clone(),
            end_value: criteria.end.clone(),
            focus: FormField::Query,
            button: Rect::default(),
        };
        form.sync_focus();
        form
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        if self.focus != field {
            self.close_popups();
        }
        self.focus = field;
        self.sync_focus();
    }

    pub fn is_popup_open(&self) -> bool {
        self.city.dropdown.is_open() || self.start.dropdown.is_open() || self.end.dropdown.is_open()
    }

    pub fn close_popups(&mut self) {
        self.city.dropdown.close();
        self.start.dropdown.close();
        self.end.dropdown.close();
    }

    /// Criteria as currently entered. `city` is the submitted city.
    pub fn criteria(&self, city: &str) -> SearchCriteria {
        SearchCriteria {
            query: self.query.value().to_string(),
            city: city.to_string(),
            start: self.start_value.clone(),
            end: self.end_value.clone(),
            people: parse_party_size(self.people.value()),
        }
    }

    fn sync_focus(&mut self) {
        self.query.focused = self.focus == FormField::Query;
        self.people.focused = self.focus == FormField::People;
    }

    fn submit(&mut self, city: &str) -> SearchFormEvent {
        self.close_popups();
        let criteria = self.criteria(city);
        // Show the coerced party size back in the field
        self.people.set_value(criteria.people.to_string());
        SearchFormEvent::Submit(criteria)
    }

    fn apply_date(&mut self, field: FormField, event: DatePickerEvent) {
        if let DatePickerEvent::Picked(iso) = event {
            match field {
                FormField::Start => self.start_value = iso,
                _ => self.end_value = iso,
            }
        }
    }

    fn open_focused(&mut self) {
        match self.focus {
            FormField::City => self.city.dropdown.open(),
            FormField::Start => self.start.dropdown.open(),
            FormField::End => self.end.dropdown.open(),
            _ => {}
        }
    }

    /// Route one event. `current_city` is the submitted city.
    pub fn handle_event(&mut self, event: &TuiEvent, current_city: &str) -> Option<SearchFormEvent> {
        if let Some((col, row)) = event.click_position() {
            return self.handle_click(event, col, row, current_city);
        }

        let current = Some(current_city).filter(|c| !c.is_empty());
        match self.focus {
            FormField::City if self.city.dropdown.is_open() => {
                return match self.city.handle_event(event, current)? {
                    CityPickerEvent::Picked(city) => Some(SearchFormEvent::PickCity(city)),
                    CityPickerEvent::Dismissed => None,
                };
            }
            FormField::Start if self.start.dropdown.is_open() => {
                let picked = self.start.handle_event(event)?;
                self.apply_date(FormField::Start, picked);
                return None;
            }
            FormField::End if self.end.dropdown.is_open() => {
                let picked = self.end.handle_event(event)?;
                self.apply_date(FormField::End, picked);
                return None;
            }
            _ => {}
        }

        match event {
            TuiEvent::NextField => {
                self.set_focus(self.focus.next());
                None
            }
            TuiEvent::PrevField => {
                self.set_focus(self.focus.prev());
                None
            }
            TuiEvent::Submit if matches!(self.focus, FormField::City | FormField::Start | FormField::End) => {
                self.open_focused();
                None
            }
            TuiEvent::Submit if self.focus == FormField::Button => Some(self.submit(current_city)),
            _ => {
                let field = match self.focus {
                    FormField::Query => &mut self.query,
                    FormField::People => &mut self.people,
                    _ => return None,
                };
                match field.handle_event(event)? {
                    TextFieldEvent::Submit(_) => Some(self.submit(current_city)),
                    TextFieldEvent::Changed | TextFieldEvent::Focus => None,
                }
            }
        }
    }

    fn handle_click(&mut self, event: &TuiEvent, col: u16, row: u16, current_city: &str) -> Option<SearchFormEvent> {
        let current = Some(current_city).filter(|c| !c.is_empty());

        // Every picker sees the click; only open ones react to outside clicks
        let city = self.city.handle_event(event, current);
        if let Some(picked) = self.start.handle_event(event) {
            self.apply_date(FormField::Start, picked);
        }
        if let Some(picked) = self.end.handle_event(event) {
            self.apply_date(FormField::End, picked);
        }

        let clicked = if hit(self.city.dropdown.trigger_area(), col, row) {
            Some(FormField::City)
        } else if hit(self.start.dropdown.trigger_area(), col, row) {
            Some(FormField::Start)
        } else if hit(self.end.dropdown.trigger_area(), col, row) {
            Some(FormField::End)
        } else if self.query.handle_event(event) == Some(TextFieldEvent::Focus) {
            Some(FormField::Query)
        } else if self.people.handle_event(event) == Some(TextFieldEvent::Focus) {
            Some(FormField::People)
        } else if hit(self.button, col, row) {
            Some(FormField::Button)
        } else {
            None
        };
        if let Some(field) = clicked {
            // Don't route through set_focus: that would close the picker just toggled open
            self.focus = field;
            self.sync_focus();
        }

        match city {
            Some(CityPickerEvent::Picked(city)) => Some(SearchFormEvent::PickCity(city)),
            _ if clicked == Some(FormField::Button) => Some(self.submit(current_city)),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct SearchFormView<'a> {
    state: &'a mut SearchForm,
    current_city: &'a str,
    active: bool,
}

impl<'a> SearchFormView<'a> {
    pub fn new(state: &'a mut SearchForm, current_city: &'a str, active: bool) -> Self {
        Self { state, current_city, active }
    }

    fn focused(&self, field: FormField) -> bool {
        self.active && self.state.focus == field
    }

    /// Draw whichever picker is open. Call after everything it may cover.
    pub fn render_popups(&mut self, frame: &mut Frame) {
        let current = Some(self.current_city).filter(|c| !c.is_empty());
        let city_focused = self.focused(FormField::City);
        let start_focused = self.focused(FormField::Start);
        let end_focused = self.focused(FormField::End);
        let state = &mut *self.state;
        CityPicker::new(&mut state.city, current, city_focused).render_popup(frame);
        DatePicker::new(&mut state.start, "Start", &state.start_value, start_focused).render_popup(frame);
        DatePicker::new(&mut state.end, "End", &state.end_value, end_focused).render_popup(frame);
    }
}

impl Component for SearchFormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [query_area, row_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(area);
        let [city_area, start_area, end_area, people_area, button_area] = Layout::horizontal([
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(12),
        ])
        .areas(row_area);

        let current = Some(self.current_city).filter(|c| !c.is_empty());
        let city_focused = self.focused(FormField::City);
        let start_focused = self.focused(FormField::Start);
        let end_focused = self.focused(FormField::End);
        let button_focused = self.focused(FormField::Button);
        let active = self.active;

        let state = &mut *self.state;
        state.query.focused = active && state.focus == FormField::Query;
        state.people.focused = active && state.focus == FormField::People;
        state.query.render(frame, query_area);
        CityPicker::new(&mut state.city, current, city_focused).render(frame, city_area);
        DatePicker::new(&mut state.start, "Start", &state.start_value, start_focused).render(frame, start_area);
        DatePicker::new(&mut state.end, "End", &state.end_value, end_focused).render(frame, end_area);
        state.people.render(frame, people_area);

        state.button = button_area;
        let style = if button_focused {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let button = Paragraph::new("Search")
            .centered()
            .style(style)
            .block(Block::bordered().border_type(BorderType::Rounded).border_style(style));
        frame.render_widget(button, button_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn form() -> SearchForm {
        SearchForm::new(&SearchCriteria::default(), today())
    }

    fn render(form: &mut SearchForm, city: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal
            .draw(|f| {
                let mut view = SearchFormView::new(form, city, true);
                view.render(f, Rect::new(0, 0, 100, SEARCH_FORM_HEIGHT));
                view.render_popups(f);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn type_text(form: &mut SearchForm, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c), "");
        }
    }

    #[test]
    fn test_enter_in_query_submits_criteria() {
        let mut form = form();
        type_text(&mut form, "museum");
        let event = form.handle_event(&TuiEvent::Submit, "Lisbon");
        assert_eq!(
            event,
            Some(SearchFormEvent::Submit(SearchCriteria {
                query: "museum".to_string(),
                city: "Lisbon".to_string(),
                ..SearchCriteria::default()
            }))
        );
    }

    #[test]
    fn test_query_reaches_criteria_verbatim() {
        let mut form = form();
        type_text(&mut form, " 1");
        let Some(SearchFormEvent::Submit(criteria)) = form.handle_event(&TuiEvent::Submit, "") else {
            panic!("expected submit");
        };
        assert_eq!(criteria.query, " 1");
    }

    #[test]
    fn test_invalid_party_size_coerced_to_one() {
        let mut form = form();
        form.set_focus(FormField::People);
        form.handle_event(&TuiEvent::Backspace, "");
        form.handle_event(&TuiEvent::InputChar('0'), "");
        let Some(SearchFormEvent::Submit(criteria)) = form.handle_event(&TuiEvent::Submit, "") else {
            panic!("expected submit");
        };
        assert_eq!(criteria.people, 1);
        assert_eq!(form.people.value(), "1");
    }

    #[test]
    fn test_tab_cycles_and_closes_popups() {
        let mut form = form();
        form.handle_event(&TuiEvent::NextField, "");
        assert_eq!(form.focus(), FormField::City);
        form.handle_event(&TuiEvent::Submit, "");
        assert!(form.is_popup_open());
        // While open, keys belong to the dropdown
        form.handle_event(&TuiEvent::Escape, "");
        assert!(!form.is_popup_open());

        form.handle_event(&TuiEvent::Submit, "");
        form.close_popups();
        form.handle_event(&TuiEvent::PrevField, "");
        assert_eq!(form.focus(), FormField::Query);
        form.handle_event(&TuiEvent::PrevField, "");
        assert_eq!(form.focus(), FormField::Button);
    }

    #[test]
    fn test_city_pick_reports_and_toggles() {
        let mut form = form();
        form.set_focus(FormField::City);
        form.handle_event(&TuiEvent::Submit, "");
        form.handle_event(&TuiEvent::CursorDown, "");
        assert_eq!(
            form.handle_event(&TuiEvent::Submit, ""),
            Some(SearchFormEvent::PickCity(Some("Lisbon".to_string())))
        );

        form.handle_event(&TuiEvent::Submit, "Lisbon");
        form.handle_event(&TuiEvent::CursorDown, "Lisbon");
        assert_eq!(
            form.handle_event(&TuiEvent::Submit, "Lisbon"),
            Some(SearchFormEvent::PickCity(None))
        );
    }

    #[test]
    fn test_date_pick_is_form_local() {
        let mut form = form();
        form.set_focus(FormField::Start);
        form.handle_event(&TuiEvent::Submit, "");
        form.handle_event(&TuiEvent::CursorDown, "");
        assert_eq!(form.handle_event(&TuiEvent::Submit, ""), None);
        assert_eq!(form.criteria("").start, "2025-09-02");
        assert!(render(&mut form, "").contains("Tue, Sep 2"));
    }

    #[test]
    fn test_outside_click_closes_only_open_picker() {
        let mut form = form();
        render(&mut form, "");
        let city_trigger = form.city.dropdown.trigger_area();
        form.handle_event(&TuiEvent::MouseClick(city_trigger.x + 1, city_trigger.y + 1), "");
        assert!(form.city.dropdown.is_open());
        assert_eq!(form.focus(), FormField::City);
        render(&mut form, "");

        form.handle_event(&TuiEvent::MouseClick(99, 15), "");
        assert!(!form.is_popup_open());
    }

    #[test]
    fn test_button_click_submits() {
        let mut form = form();
        render(&mut form, "");
        let button = form.button;
        let event = form.handle_event(&TuiEvent::MouseClick(button.x + 2, button.y + 1), "Prague");
        assert!(matches!(event, Some(SearchFormEvent::Submit(c)) if c.city == "Prague"));
    }
}
