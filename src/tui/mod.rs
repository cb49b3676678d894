//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! returns an `Effect` for every action; the adapter performs it (a timer for
//! the simulated search latency, a detail lookup) on a tokio task and feeds
//! the resulting action back through a channel.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws after an event or a background
//! completion. Between those it sleeps in `poll_event_timeout`.

mod component;
mod components;
mod event;
mod text;
mod ui;

use chrono::Local;
use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::Hide;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::StartScreen;
use crate::core::action::{Action, Effect, settle_after, update};
use crate::core::config::ResolvedConfig;
use crate::core::detail::{DetailProvider, MockDetailProvider};
use crate::core::space::CreateSpacePayload;
use crate::core::search::SearchCriteria;
use crate::core::state::{App, DetailView, Route, SearchState};
use crate::tui::component::{EventHandler, hit};
use crate::tui::components::attraction_detail::{DetailEvent, DetailPageState};
use crate::tui::components::create_space::{CreateSpaceEvent, CreateSpacePrompt};
use crate::tui::components::home::{HomeEvent, HomePage};
use crate::tui::components::results::{ResultsEvent, ResultsState};
use crate::tui::components::search_form::{SearchForm, SearchFormEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which half of the search page receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPane {
    #[default]
    Form,
    Results,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub home: HomePage,
    pub search_form: SearchForm,
    pub results: ResultsState,
    pub detail: DetailPageState,
    // Create Space overlay (None = hidden)
    pub create_space: Option<CreateSpacePrompt>,
    pub search_pane: SearchPane,
    // Layout, refreshed every frame
    pub narrow_breakpoint: u16,
    pub is_narrow: bool,
    pub form_area: Rect,
    pub results_area: Rect,
}

impl TuiState {
    pub fn new(app: &App, narrow_breakpoint: u16) -> Self {
        Self {
            home: HomePage::default(),
            search_form: SearchForm::new(app.search.criteria(), Local::now().date_naive()),
            results: ResultsState::default(),
            detail: DetailPageState::new(app.settings.trip_dates.clone()),
            create_space: None,
            search_pane: SearchPane::default(),
            narrow_breakpoint,
            is_narrow: false,
            form_area: Rect::default(),
            results_area: Rect::default(),
        }
    }
}

/// Route one terminal event through the components and into the core.
///
/// Global shortcuts come first, then the Create Space prompt (modal while
/// open), then whichever page the route shows.
pub fn dispatch(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        TuiEvent::ToggleLogin => return update(app, Action::ToggleLogin),
        TuiEvent::Resize => return Effect::None,
        _ => {}
    }

    if let Some(prompt) = tui.create_space.as_mut() {
        return match prompt.handle_event(event) {
            Some(CreateSpaceEvent::Confirm(payload)) => {
                tui.create_space = None;
                update(app, Action::CreateSpace(payload))
            }
            Some(CreateSpaceEvent::Close) => {
                debug!("Create space prompt closed");
                tui.create_space = None;
                Effect::None
            }
            None => Effect::None,
        };
    }

    match event {
        TuiEvent::GoHome => return update(app, Action::Navigate(Route::Home)),
        TuiEvent::GoSearch => return enter_search(app, tui),
        TuiEvent::NewSpace => {
            let defaults = CreateSpacePayload::from_criteria(app.search.criteria());
            tui.create_space = Some(CreateSpacePrompt::new(defaults));
            return Effect::None;
        }
        _ => {}
    }

    match app.route.clone() {
        Route::Home => match tui.home.handle_event(event) {
            Some(HomeEvent::StartExploring) => enter_search(app, tui),
            None => Effect::None,
        },
        Route::Search => dispatch_search(app, tui, event),
        Route::Attraction(place_id) => match tui.detail.handle_event(event) {
            Some(DetailEvent::AddToTrip(date)) => update(app, Action::AddToTrip { place_id, date }),
            Some(DetailEvent::Back) => update(app, Action::Navigate(Route::Search)),
            None => Effect::None,
        },
    }
}

/// Show the search page. Arriving from Home runs the submitted criteria
/// again, the way the page searches when it first mounts.
fn enter_search(app: &mut App, tui: &mut TuiState) -> Effect {
    let from_home = app.route == Route::Home;
    let effect = update(app, Action::Navigate(Route::Search));
    if !from_home {
        return effect;
    }
    tui.results.reset();
    tui.search_pane = SearchPane::Form;
    let criteria = app.search.criteria().clone();
    update(app, Action::SubmitSearch(criteria))
}

fn dispatch_search(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    let city = app.search.criteria().city.clone();

    if let Some((col, row)) = event.click_position() {
        // The form sees every click so an open picker can close itself
        let popup_was_open = tui.search_form.is_popup_open();
        if let Some(form_event) = tui.search_form.handle_event(event, &city) {
            tui.search_pane = SearchPane::Form;
            return form_event_to_effect(app, tui, form_event);
        }
        if popup_was_open || tui.search_form.is_popup_open() || hit(tui.form_area, col, row) {
            tui.search_pane = SearchPane::Form;
            return Effect::None;
        }
        if hit(tui.results_area, col, row) {
            tui.search_pane = SearchPane::Results;
        }
        return match tui.results.handle_event(event) {
            Some(results_event) => results_event_to_effect(app, tui, results_event),
            None => Effect::None,
        };
    }

    if matches!(event, TuiEvent::ScrollUp | TuiEvent::ScrollDown) && !tui.search_form.is_popup_open() {
        tui.results.handle_event(event);
        return Effect::None;
    }

    match tui.search_pane {
        SearchPane::Form => {
            if *event == TuiEvent::CursorDown && !tui.search_form.is_popup_open() {
                tui.search_pane = SearchPane::Results;
                return Effect::None;
            }
            match tui.search_form.handle_event(event, &city) {
                Some(form_event) => form_event_to_effect(app, tui, form_event),
                None => Effect::None,
            }
        }
        SearchPane::Results => {
            if matches!(event, TuiEvent::Escape | TuiEvent::NextField | TuiEvent::PrevField) {
                tui.search_pane = SearchPane::Form;
                return Effect::None;
            }
            match tui.results.handle_event(event) {
                Some(results_event) => results_event_to_effect(app, tui, results_event),
                None => Effect::None,
            }
        }
    }
}

fn form_event_to_effect(app: &mut App, tui: &mut TuiState, event: SearchFormEvent) -> Effect {
    tui.results.reset();
    match event {
        SearchFormEvent::Submit(criteria) => update(app, Action::SubmitSearch(criteria)),
        SearchFormEvent::PickCity(city) => update(app, Action::PickCity(city)),
    }
}

fn results_event_to_effect(app: &mut App, tui: &mut TuiState, event: ResultsEvent) -> Effect {
    match event {
        ResultsEvent::Open(place_id) => {
            tui.detail.reset();
            update(app, Action::Navigate(Route::Attraction(place_id)))
        }
        ResultsEvent::GoToPage(page) => update(
            app,
            Action::SetPage {
                page,
                is_narrow: tui.is_narrow,
            },
        ),
        ResultsEvent::FocusForm => {
            tui.search_pane = SearchPane::Form;
            Effect::None
        }
    }
}

/// RAII guard that enables terminal modes on creation and restores them on drop.
/// Ensures cleanup even if the main loop panics.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

/// Perform an effect. Returns `true` when the app should quit.
fn perform(
    effect: Effect,
    provider: &Arc<dyn DetailProvider>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::ScheduleSettle { request, delay } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                let action = settle_after(request, delay).await;
                let _ = tx.send(action);
            });
            false
        }
        Effect::FetchDetail(place_id) => {
            let tx = tx.clone();
            let provider = Arc::clone(provider);
            tokio::spawn(async move {
                let result = provider.fetch_detail(&place_id).await.map_err(|e| {
                    warn!("Detail lookup via {} failed: {}", provider.name(), e);
                    e.to_string()
                });
                let _ = tx.send(Action::DetailLoaded { place_id, result });
            });
            false
        }
    }
}

pub fn run(config: ResolvedConfig, start: StartScreen) -> std::io::Result<()> {
    let mut app = App::with_mock_catalog(config.search_settings());
    app.search = SearchState::new(SearchCriteria {
        people: config.default_people,
        ..SearchCriteria::default()
    });
    let provider: Arc<dyn DetailProvider> = Arc::new(MockDetailProvider::new(app.catalog.clone()));
    let mut tui = TuiState::new(&app, config.narrow_breakpoint);
    info!(
        "Catalog loaded: {} attractions, detail provider: {}",
        app.catalog.len(),
        provider.name()
    );

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if start == StartScreen::Search {
        let effect = enter_search(&mut app, &mut tui);
        perform(effect, &provider, &tx);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short while a search or lookup is in flight so completions show promptly
        let busy = app.search.is_loading() || matches!(app.detail, DetailView::Loading(_));
        let timeout = if busy {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = dispatch(&mut app, &mut tui, &event);
            if perform(effect, &provider, &tx) {
                should_quit = true;
            }
        }

        // Process actions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            if perform(effect, &provider, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            info!("Quit requested, shutting down");
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::RequestId;
    use crate::test_support::test_app;

    fn setup() -> (App, TuiState) {
        let app = test_app();
        let tui = TuiState::new(&app, 100);
        (app, tui)
    }

    #[test]
    fn test_force_quit() {
        let (mut app, mut tui) = setup();
        assert_eq!(dispatch(&mut app, &mut tui, &TuiEvent::ForceQuit), Effect::Quit);
    }

    #[test]
    fn test_start_exploring_navigates_and_searches() {
        let (mut app, mut tui) = setup();
        let effect = dispatch(&mut app, &mut tui, &TuiEvent::Submit);
        assert_eq!(app.route, Route::Search);
        assert!(matches!(effect, Effect::ScheduleSettle { request: RequestId(1), .. }));
        assert!(app.search.is_loading());
    }

    #[test]
    fn test_go_search_from_detail_does_not_resubmit() {
        let (mut app, mut tui) = setup();
        app.route = Route::Attraction("pl_1".to_string());
        assert_eq!(dispatch(&mut app, &mut tui, &TuiEvent::GoSearch), Effect::None);
        assert_eq!(app.route, Route::Search);
        assert!(!app.search.is_loading());
    }

    #[test]
    fn test_create_space_prompt_is_modal() {
        let (mut app, mut tui) = setup();
        dispatch(&mut app, &mut tui, &TuiEvent::NewSpace);
        assert!(tui.create_space.is_some());

        // Home would start exploring on Enter; the prompt confirms instead
        let effect = dispatch(&mut app, &mut tui, &TuiEvent::Submit);
        assert_eq!(effect, Effect::None);
        assert!(tui.create_space.is_none());
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.spaces.len(), 1);
        assert_eq!(app.spaces[0].payload.name, "My Trip");
    }

    #[test]
    fn test_create_space_escape_closes_without_creating() {
        let (mut app, mut tui) = setup();
        dispatch(&mut app, &mut tui, &TuiEvent::NewSpace);
        dispatch(&mut app, &mut tui, &TuiEvent::Escape);
        assert!(tui.create_space.is_none());
        assert!(app.spaces.is_empty());
    }

    #[test]
    fn test_toggle_login_works_with_prompt_open() {
        let (mut app, mut tui) = setup();
        dispatch(&mut app, &mut tui, &TuiEvent::NewSpace);
        dispatch(&mut app, &mut tui, &TuiEvent::ToggleLogin);
        assert!(app.logged_in);
        assert!(tui.create_space.is_some());
    }

    #[test]
    fn test_cursor_down_moves_to_results_pane() {
        let (mut app, mut tui) = setup();
        app.route = Route::Search;
        dispatch(&mut app, &mut tui, &TuiEvent::CursorDown);
        assert_eq!(tui.search_pane, SearchPane::Results);
        dispatch(&mut app, &mut tui, &TuiEvent::Escape);
        assert_eq!(tui.search_pane, SearchPane::Form);
    }

    #[test]
    fn test_detail_back_and_add_to_trip() {
        let (mut app, mut tui) = setup();
        let effect = update(&mut app, Action::Navigate(Route::Attraction("pl_3".to_string())));
        assert_eq!(effect, Effect::FetchDetail("pl_3".to_string()));
        assert_eq!(app.detail, DetailView::Loading("pl_3".to_string()));

        // Tab to the add-to-trip control, open it, commit the first date
        dispatch(&mut app, &mut tui, &TuiEvent::NextField);
        dispatch(&mut app, &mut tui, &TuiEvent::Submit);
        dispatch(&mut app, &mut tui, &TuiEvent::Submit);
        assert_eq!(app.trip.len(), 1);
        assert_eq!(app.trip[0].place_id, "pl_3");
        assert_eq!(app.trip[0].date, "2025-09-01");

        dispatch(&mut app, &mut tui, &TuiEvent::Escape);
        assert_eq!(app.route, Route::Search);
    }
}
