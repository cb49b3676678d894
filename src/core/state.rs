//! # Application State
//!
//! Core business state for TripSync. This module contains domain logic only -
//! no TUI-specific types. Presentation state (widget open flags, focus,
//! scroll offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Vec<Attraction>      // static mock data, never mutated
//! ├── search: SearchState           // criteria + page + in-flight request
//! ├── route: Route                  // Home | Search | Attraction(place_id)
//! ├── detail: DetailView            // resolved record for the detail page
//! ├── trip: Vec<TripStop>           // add-to-trip picks (memory only)
//! ├── spaces: Vec<Space>            // created spaces (memory only)
//! ├── logged_in: bool               // demo login toggle
//! ├── status_message: String        // title bar text
//! └── settings: SearchSettings      // latency, page sizes, trip dates
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::Duration;

use crate::core::catalog::{Attraction, mock_catalog};
use crate::core::detail::AttractionDetail;
use crate::core::search::{
    self, DEFAULT_PAGE_SIZE_NARROW, DEFAULT_PAGE_SIZE_WIDE, SearchCriteria,
};
use crate::core::space::Space;

/// Simulated network latency for a search.
pub const DEFAULT_SEARCH_LATENCY: Duration = Duration::from_millis(350);

/// Identity of one submitted search. Later submissions get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// The View-State Controller.
///
/// Holds the submitted criteria and the current page, and tracks which
/// search is in flight. Only the completion of the *latest* request may
/// clear the loading state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    criteria: SearchCriteria,
    page: usize,
    next_request: u64,
    pending: Option<RequestId>,
}

impl SearchState {
    pub fn new(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            page: 1,
            next_request: 0,
            pending: None,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// Raw stored page. Use [`SearchState::current_page`] for display.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    /// Replace the criteria, jump back to page 1, and start a new request.
    ///
    /// Any request still in flight becomes stale.
    pub fn submit(&mut self, criteria: SearchCriteria) -> RequestId {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.criteria = criteria;
        self.page = 1;
        self.pending = Some(id);
        id
    }

    /// Mark `id` as finished. Returns `false` (and changes nothing) when a
    /// newer search has been submitted since.
    pub fn settle(&mut self, id: RequestId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Set the page, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) -> usize {
        self.page = search::clamp_page(page, total_pages);
        self.page
    }

    /// Stored page clamped against the current page count, which can shrink
    /// when the viewport widens.
    pub fn current_page(&self, total_pages: usize) -> usize {
        search::clamp_page(self.page, total_pages)
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Search,
    Attraction(String),
}

/// Load state of the detail page's record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailView {
    #[default]
    Idle,
    Loading(String),
    Ready(AttractionDetail),
    Failed { place_id: String, message: String },
}

/// A day assigned to an attraction via "Add to trip".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripStop {
    pub place_id: String,
    pub date: String,
}

/// Knobs that come from configuration.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub latency: Duration,
    pub page_size_wide: usize,
    pub page_size_narrow: usize,
    pub trip_dates: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            latency: DEFAULT_SEARCH_LATENCY,
            page_size_wide: DEFAULT_PAGE_SIZE_WIDE,
            page_size_narrow: DEFAULT_PAGE_SIZE_NARROW,
            trip_dates: Vec::new(),
        }
    }
}

pub struct App {
    pub catalog: Vec<Attraction>,
    pub search: SearchState,
    pub route: Route,
    pub detail: DetailView,
    pub trip: Vec<TripStop>,
    pub spaces: Vec<Space>,
    pub logged_in: bool,
    pub status_message: String,
    pub settings: SearchSettings,
}

impl App {
    pub fn new(catalog: Vec<Attraction>, settings: SearchSettings) -> Self {
        Self {
            catalog,
            search: SearchState::new(SearchCriteria::default()),
            route: Route::default(),
            detail: DetailView::default(),
            trip: Vec::new(),
            spaces: Vec::new(),
            logged_in: false,
            status_message: String::from("Welcome to TripSync!"),
            settings,
        }
    }

    pub fn with_mock_catalog(settings: SearchSettings) -> Self {
        Self::new(mock_catalog(), settings)
    }

    /// Filtered results for the submitted criteria. Recomputed per call.
    pub fn results(&self) -> Vec<&Attraction> {
        let criteria = self.search.criteria();
        search::filter(&self.catalog, &criteria.query, &criteria.city)
    }

    pub fn page_size(&self, is_narrow: bool) -> usize {
        search::page_size_for(
            is_narrow,
            self.settings.page_size_wide,
            self.settings.page_size_narrow,
        )
    }

    pub fn total_pages(&self, is_narrow: bool) -> usize {
        search::total_pages(self.results().len(), self.page_size(is_narrow))
    }

    pub fn current_page(&self, is_narrow: bool) -> usize {
        self.search.current_page(self.total_pages(is_narrow))
    }

    /// The cards visible on the current page.
    pub fn page_items(&self, is_narrow: bool) -> Vec<&Attraction> {
        let results = self.results();
        let size = self.page_size(is_narrow);
        let page = self
            .search
            .current_page(search::total_pages(results.len(), size));
        search::page_slice(&results, page, size).to_vec()
    }

    pub fn find_attraction(&self, place_id: &str) -> Option<&Attraction> {
        self.catalog.iter().find(|a| a.place_id == place_id)
    }
}
