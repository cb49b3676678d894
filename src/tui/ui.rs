use crate::core::state::{App, Route};
use crate::tui::component::Component;
use crate::tui::components::TitleBar;
use crate::tui::components::attraction_detail::DetailPage;
use crate::tui::components::results::Results;
use crate::tui::components::search_form::{SEARCH_FORM_HEIGHT, SearchFormView};
use crate::tui::{SearchPane, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const SHORTCUTS: &[(&str, &str)] = &[
    ("^G", "home"),
    ("^F", "search"),
    ("^N", "new space"),
    ("^L", "sign in"),
    ("^C", "quit"),
];

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let area = frame.area();
    tui.is_narrow = area.width <= tui.narrow_breakpoint;

    let [title_area, main_area, footer_area] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);

    TitleBar::new(&app.route, &app.status_message, app.logged_in).render(frame, title_area);

    match &app.route {
        Route::Home => tui.home.render(frame, main_area),
        Route::Search => draw_search(frame, main_area, app, tui),
        Route::Attraction(_) => {
            let mut page = DetailPage::new(&mut tui.detail, &app.detail, tui.is_narrow);
            page.render(frame, main_area);
            page.render_overlays(frame);
        }
    }

    draw_footer(frame, footer_area);

    // Modal prompt covers everything, popups included
    if let Some(prompt) = tui.create_space.as_mut() {
        prompt.render(frame, area);
    }
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let [form_area, results_area] =
        Layout::vertical([Constraint::Length(SEARCH_FORM_HEIGHT), Constraint::Min(0)]).areas(area);
    tui.form_area = form_area;
    tui.results_area = results_area;

    let is_narrow = tui.is_narrow;
    let form_active = tui.search_pane == SearchPane::Form;
    let items = app.page_items(is_narrow);
    Results::new(&mut tui.results, &items)
        .count(app.results().len())
        .page(app.current_page(is_narrow), app.total_pages(is_narrow))
        .loading(app.search.is_loading())
        .narrow(is_narrow)
        .focused(!form_active)
        .render(frame, results_area);

    let city = app.search.criteria().city.as_str();
    let mut form = SearchFormView::new(&mut tui.search_form, city, form_active);
    form.render(frame, form_area);
    // Picker lists hang over the results
    form.render_popups(frame);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for (idx, (key, label)) in SHORTCUTS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" · ", dim));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {label}"), dim));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::detail::mock_detail;
    use crate::core::search::SearchCriteria;
    use crate::core::state::{DetailView, RequestId};
    use crate::test_support::{buffer_text, test_app};
    use crate::tui::event::TuiEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_home_screen() {
        let app = test_app();
        let mut tui = TuiState::new(&app, 100);
        let text = draw(&app, &mut tui, 120, 30);
        assert!(text.contains("[Home]"));
        assert!(text.contains("Start Exploring"));
        assert!(text.contains("^N new space"));
    }

    #[test]
    fn test_breakpoint_sets_narrow_flag() {
        let app = test_app();
        let mut tui = TuiState::new(&app, 100);
        draw(&app, &mut tui, 100, 30);
        assert!(tui.is_narrow);
        draw(&app, &mut tui, 101, 30);
        assert!(!tui.is_narrow);
    }

    #[test]
    fn test_search_loading_then_settled() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app, 100);
        update(&mut app, Action::Navigate(Route::Search));
        update(&mut app, Action::SubmitSearch(SearchCriteria::default()));
        let text = draw(&app, &mut tui, 120, 40);
        assert!(text.contains("Searching…"));

        update(&mut app, Action::SearchSettled(RequestId(1)));
        let text = draw(&app, &mut tui, 120, 40);
        assert!(text.contains("42 results found"));
        assert!(text.contains("Page 1 of 2"));
    }

    #[test]
    fn test_narrow_layout_uses_smaller_pages() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app, 100);
        update(&mut app, Action::Navigate(Route::Search));
        let text = draw(&app, &mut tui, 80, 40);
        assert!(text.contains("Page 1 of 3"));
    }

    #[test]
    fn test_detail_page() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app, 100);
        app.route = Route::Attraction("pl_1".to_string());
        app.detail = DetailView::Ready(mock_detail("pl_1"));
        let text = draw(&app, &mut tui, 120, 50);
        assert!(text.contains("National Museum of Art"));
        assert!(text.contains("[Search]"));
    }

    #[test]
    fn test_create_space_prompt_draws_on_top() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app, 100);
        crate::tui::dispatch(&mut app, &mut tui, &TuiEvent::NewSpace);
        let text = draw(&app, &mut tui, 120, 40);
        assert!(text.contains("Create Space"));
    }
}
