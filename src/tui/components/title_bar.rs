//! # TitleBar Component
//!
//! Top bar: brand, navigation, login state, and the status message.
//!
//! ```text
//! TripSync  Home  [Search]                 42 results found · Sign in (^L)
//! ```
//!
//! ## Design Decisions
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state; navigation happens through the global shortcuts shown
//! in the footer.
//!
//! When the terminal is too narrow for everything, the status message is
//! truncated first so the brand and nav stay readable.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::Route;
use crate::tui::component::Component;
use crate::tui::text::truncate;

pub struct TitleBar<'a> {
    pub route: &'a Route,
    pub status_message: &'a str,
    pub logged_in: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(route: &'a Route, status_message: &'a str, logged_in: bool) -> Self {
        Self {
            route,
            status_message,
            logged_in,
        }
    }

    fn nav_span(label: &'static str, active: bool) -> Span<'static> {
        if active {
            Span::styled(
                format!("[{label}]"),
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::Gray))
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let left = Line::from(vec![
            Span::styled("TripSync", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Self::nav_span("Home", *self.route == Route::Home),
            Span::raw(" "),
            // Detail pages live under search
            Self::nav_span("Search", *self.route != Route::Home),
        ]);

        let login = if self.logged_in {
            Span::styled("Signed in ✓", Style::default().fg(Color::Green))
        } else {
            Span::styled("Sign in (^L)", Style::default().fg(Color::Yellow))
        };
        let left_width = left.width();
        let budget = usize::from(area.width)
            .saturating_sub(left_width + login.width() + 4);
        let mut right = Vec::new();
        if !self.status_message.is_empty() && budget > 1 {
            right.push(Span::styled(
                truncate(self.status_message, budget),
                Style::default().fg(Color::Gray),
            ));
            right.push(Span::raw(" · "));
        }
        right.push(login);

        frame.render_widget(Paragraph::new(left), area);
        frame.render_widget(Paragraph::new(Line::from(right)).right_aligned(), area);
    }
}
