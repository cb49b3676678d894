//! # Actions
//!
//! Everything that can happen in TripSync becomes an `Action`.
//! User submits the search form? That's `Action::SubmitSearch(criteria)`.
//! The simulated latency elapses? That's `Action::SearchSettled(id)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an [`Effect`] describing any I/O the adapter must start.
//! No side effects here beyond logging. Timers and fetches happen elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::{debug, info};

use crate::core::detail::AttractionDetail;
use crate::core::search::SearchCriteria;
use crate::core::space::{CreateSpacePayload, Space};
use crate::core::state::{App, DetailView, RequestId, Route, TripStop};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the criteria and start a new simulated search.
    SubmitSearch(SearchCriteria),
    /// The simulated latency for a request has elapsed.
    SearchSettled(RequestId),
    /// Jump to a page. `is_narrow` is the viewport signal at the time of the request.
    SetPage { page: usize, is_narrow: bool },
    /// City picker committed; `None` clears the city.
    PickCity(Option<String>),
    Navigate(Route),
    /// The detail provider answered for `place_id`.
    DetailLoaded {
        place_id: String,
        result: Result<AttractionDetail, String>,
    },
    AddToTrip { place_id: String, date: String },
    CreateSpace(CreateSpacePayload),
    ToggleLogin,
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Send `SearchSettled(request)` after `delay`.
    ScheduleSettle { request: RequestId, delay: Duration },
    /// Resolve details for a place id and send `DetailLoaded`.
    FetchDetail(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitSearch(criteria) => submit(app, criteria),
        Action::SearchSettled(id) => {
            if app.search.settle(id) {
                let count = app.results().len();
                debug!("Search {:?} settled with {} results", id, count);
                app.status_message = format!("{count} results found");
            } else {
                debug!("Discarding stale completion for {:?}", id);
            }
            Effect::None
        }
        Action::SetPage { page, is_narrow } => {
            let total = app.total_pages(is_narrow);
            let page = app.search.set_page(page, total);
            debug!("Page set to {}/{}", page, total);
            Effect::None
        }
        Action::PickCity(city) => {
            let criteria = app.search.criteria().with_city(city.as_deref());
            match &city {
                Some(name) => info!("City picked: {name}"),
                None => info!("City selection cleared"),
            }
            submit(app, criteria)
        }
        Action::Navigate(route) => {
            debug!("Navigate to {:?}", route);
            let effect = match &route {
                Route::Attraction(place_id) => {
                    app.detail = DetailView::Loading(place_id.clone());
                    Effect::FetchDetail(place_id.clone())
                }
                _ => Effect::None,
            };
            app.route = route;
            effect
        }
        Action::DetailLoaded { place_id, result } => {
            // Only the record for the page currently open is kept
            if app.detail != DetailView::Loading(place_id.clone()) {
                debug!("Dropping detail for {place_id}: no longer requested");
                return Effect::None;
            }
            app.detail = match result {
                Ok(detail) => DetailView::Ready(detail),
                Err(message) => {
                    app.status_message = format!("Could not load {place_id}");
                    DetailView::Failed { place_id, message }
                }
            };
            Effect::None
        }
        Action::AddToTrip { place_id, date } => {
            info!("Add to trip {} {}", place_id, date);
            app.status_message = format!("Added to trip on {date}");
            app.trip.push(TripStop { place_id, date });
            Effect::None
        }
        Action::CreateSpace(payload) => {
            let space = Space::create(payload);
            info!("Create space {} {:?}", space.id, space.payload);
            app.status_message = format!("Space \"{}\" created", space.payload.name);
            app.spaces.push(space);
            Effect::None
        }
        Action::ToggleLogin => {
            app.logged_in = !app.logged_in;
            info!("Demo login toggled: logged_in={}", app.logged_in);
            app.status_message = if app.logged_in {
                "Signed in".to_string()
            } else {
                "Signed out".to_string()
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, criteria: SearchCriteria) -> Effect {
    let request = app.search.submit(criteria);
    info!(
        "Search {:?} submitted: query={:?} city={:?} people={}",
        request,
        app.search.criteria().query,
        app.search.criteria().city,
        app.search.criteria().people
    );
    app.status_message = "Searching...".to_string();
    Effect::ScheduleSettle {
        request,
        delay: app.settings.latency,
    }
}

/// Wait out the simulated latency for `request`, then produce the action that
/// settles it. Runs on a background task; the reducer decides whether the
/// completion is still current.
pub async fn settle_after(request: RequestId, delay: Duration) -> Action {
    tokio::time::sleep(delay).await;
    Action::SearchSettled(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::detail::mock_detail;
    use crate::core::state::DEFAULT_SEARCH_LATENCY;
    use crate::test_support::test_app;

    fn scheduled(effect: Effect) -> RequestId {
        match effect {
            Effect::ScheduleSettle { request, .. } => request,
            other => panic!("Expected ScheduleSettle, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_schedules_settle_with_latency() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitSearch(SearchCriteria::default()));
        assert_eq!(
            effect,
            Effect::ScheduleSettle {
                request: RequestId(1),
                delay: DEFAULT_SEARCH_LATENCY
            }
        );
        assert!(app.search.is_loading());
        assert_eq!(app.status_message, "Searching...");
    }

    #[test]
    fn test_submit_resets_page_from_any_page() {
        let mut app = test_app();
        update(&mut app, Action::SetPage { page: 2, is_narrow: false });
        assert_eq!(app.current_page(false), 2);
        update(&mut app, Action::SubmitSearch(SearchCriteria::default()));
        assert_eq!(app.current_page(false), 1);
    }

    #[test]
    fn test_set_page_out_of_range_clamps() {
        let mut app = test_app();
        update(&mut app, Action::SetPage { page: 99, is_narrow: false });
        assert_eq!(app.search.page(), 2);
        update(&mut app, Action::SetPage { page: 0, is_narrow: false });
        assert_eq!(app.search.page(), 1);
    }

    #[test]
    fn test_last_submission_wins() {
        let mut app = test_app();
        let a = scheduled(update(
            &mut app,
            Action::SubmitSearch(SearchCriteria { city: "Lisbon".into(), ..Default::default() }),
        ));
        let b = scheduled(update(
            &mut app,
            Action::SubmitSearch(SearchCriteria { city: "Prague".into(), ..Default::default() }),
        ));

        // B resolves first, then the stale A
        update(&mut app, Action::SearchSettled(b));
        update(&mut app, Action::SearchSettled(a));
        assert!(!app.search.is_loading());
        assert!(app.results().iter().all(|r| r.city == "Prague"));
    }

    #[test]
    fn test_stale_completion_does_not_clear_loading() {
        let mut app = test_app();
        let a = scheduled(update(&mut app, Action::SubmitSearch(SearchCriteria::default())));
        let _b = scheduled(update(&mut app, Action::SubmitSearch(SearchCriteria::default())));
        update(&mut app, Action::SearchSettled(a));
        assert!(app.search.is_loading());
    }

    #[test]
    fn test_pick_city_resubmits_with_other_fields() {
        let mut app = test_app();
        update(
            &mut app,
            Action::SubmitSearch(SearchCriteria {
                query: "museum".into(),
                people: 4,
                ..Default::default()
            }),
        );
        let effect = update(&mut app, Action::PickCity(Some("Lisbon".into())));
        assert!(matches!(effect, Effect::ScheduleSettle { .. }));
        assert_eq!(app.search.criteria().city, "Lisbon");
        assert_eq!(app.search.criteria().query, "museum");
        assert_eq!(app.search.criteria().people, 4);

        update(&mut app, Action::PickCity(None));
        assert_eq!(app.search.criteria().city, "");
    }

    #[test]
    fn test_navigate_to_attraction_fetches_detail() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Navigate(Route::Attraction("pl_7".into())));
        assert_eq!(effect, Effect::FetchDetail("pl_7".into()));
        assert_eq!(app.detail, DetailView::Loading("pl_7".into()));
        assert_eq!(app.route, Route::Attraction("pl_7".into()));
    }

    #[test]
    fn test_detail_for_previous_page_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::Attraction("pl_1".into())));
        update(&mut app, Action::Navigate(Route::Attraction("pl_2".into())));
        update(
            &mut app,
            Action::DetailLoaded { place_id: "pl_1".into(), result: Ok(mock_detail("pl_1")) },
        );
        assert_eq!(app.detail, DetailView::Loading("pl_2".into()));

        update(
            &mut app,
            Action::DetailLoaded { place_id: "pl_2".into(), result: Ok(mock_detail("pl_2")) },
        );
        assert!(matches!(app.detail, DetailView::Ready(ref d) if d.place_id == "pl_2"));
    }

    #[test]
    fn test_detail_failure() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::Attraction("pl_1".into())));
        update(
            &mut app,
            Action::DetailLoaded { place_id: "pl_1".into(), result: Err("boom".into()) },
        );
        assert!(matches!(app.detail, DetailView::Failed { ref message, .. } if message == "boom"));
    }

    #[test]
    fn test_add_to_trip_records_stop() {
        let mut app = test_app();
        update(
            &mut app,
            Action::AddToTrip { place_id: "pl_1".into(), date: "2025-09-02".into() },
        );
        assert_eq!(app.trip.len(), 1);
        assert_eq!(app.trip[0].date, "2025-09-02");
    }

    #[test]
    fn test_create_space_and_login() {
        let mut app = test_app();
        let payload = CreateSpacePayload::from_criteria(app.search.criteria());
        update(&mut app, Action::CreateSpace(payload));
        assert_eq!(app.spaces.len(), 1);
        assert_eq!(app.spaces[0].payload.name, "My Trip");

        update(&mut app, Action::ToggleLogin);
        assert!(app.logged_in);
        update(&mut app, Action::ToggleLogin);
        assert!(!app.logged_in);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_after_waits_for_delay() {
        let started = tokio::time::Instant::now();
        let action = settle_after(RequestId(3), Duration::from_millis(350)).await;
        assert_eq!(action, Action::SearchSettled(RequestId(3)));
        assert!(started.elapsed() >= Duration::from_millis(350));
    }
}
