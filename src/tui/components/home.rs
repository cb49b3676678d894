//! # Home Page Component
//!
//! Hero text and the three feature cards. Left/Right moves the highlight
//! between features; Enter starts exploring (goes to search).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler, hit};
use crate::tui::event::TuiEvent;

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Discover & Explore",
        description: "Uncover hidden gems and popular attractions with real-time ratings and \
                      suggestions tailored to your interests.",
    },
    Feature {
        title: "Collaborate Seamlessly",
        description: "Invite friends to share ideas, vote on destinations, and make group \
                      decisions together.",
    },
    Feature {
        title: "Plan & Organize",
        description: "Turn approved ideas into a day-by-day itinerary with flexible editing.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEvent {
    StartExploring,
}

#[derive(Debug, Default)]
pub struct HomePage {
    active: usize,
    button: Rect,
    cards: Vec<Rect>,
}

impl HomePage {
    pub fn active_feature(&self) -> usize {
        self.active
    }
}

impl EventHandler for HomePage {
    type Event = HomeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HomeEvent> {
        if let Some((col, row)) = event.click_position() {
            if hit(self.button, col, row) {
                return Some(HomeEvent::StartExploring);
            }
            if let Some(idx) = self.cards.iter().position(|r| hit(*r, col, row)) {
                self.active = idx;
            }
            return None;
        }
        match event {
            TuiEvent::CursorLeft => {
                self.active = (self.active + FEATURES.len() - 1) % FEATURES.len();
                None
            }
            TuiEvent::CursorRight => {
                self.active = (self.active + 1) % FEATURES.len();
                None
            }
            TuiEvent::Submit => Some(HomeEvent::StartExploring),
            _ => None,
        }
    }
}

impl Component for HomePage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hero = vec![
            Line::from(Span::styled(
                "Plan your perfect trip together",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Discover destinations, collaborate with friends, and build day-by-day adventures.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let [hero_area, button_area, cards_area, footer_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        frame.render_widget(
            Paragraph::new(hero).alignment(Alignment::Center).wrap(Wrap { trim: true }),
            hero_area,
        );

        let [button] = Layout::horizontal([Constraint::Length(24)]).flex(Flex::Center).areas(button_area);
        self.button = button;
        let style = Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new("Start Exploring (⏎)")
                .centered()
                .style(style)
                .block(Block::bordered().border_type(BorderType::Rounded).border_style(style)),
            button,
        );

        let card_areas = Layout::horizontal([Constraint::Max(36); 3])
            .flex(Flex::Center)
            .spacing(1)
            .split(cards_area);
        self.cards = card_areas.to_vec();
        for (idx, (feature, card)) in FEATURES.iter().zip(card_areas.iter()).enumerate() {
            let active = idx == self.active;
            let border = if active { Color::Cyan } else { Color::DarkGray };
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .title(Span::styled(
                    format!(" {} ", feature.title),
                    Style::default().add_modifier(if active { Modifier::BOLD } else { Modifier::empty() }),
                ));
            frame.render_widget(
                Paragraph::new(feature.description).wrap(Wrap { trim: true }).block(block),
                *card,
            );
        }

        let version = format!("TripSync v{} · Plan trips with friends, effortlessly.", env!("CARGO_PKG_VERSION"));
        frame.render_widget(
            Paragraph::new(version).centered().style(Style::default().fg(Color::DarkGray)),
            footer_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_feature_cycle_wraps() {
        let mut home = HomePage::default();
        home.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(home.active_feature(), 2);
        home.handle_event(&TuiEvent::CursorRight);
        home.handle_event(&TuiEvent::CursorRight);
        assert_eq!(home.active_feature(), 1);
    }

    #[test]
    fn test_enter_starts_exploring() {
        let mut home = HomePage::default();
        assert_eq!(home.handle_event(&TuiEvent::Submit), Some(HomeEvent::StartExploring));
    }

    #[test]
    fn test_render_and_click() {
        let mut home = HomePage::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| home.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Plan your perfect trip together"));
        assert!(text.contains("Collaborate Seamlessly"));

        let card = home.cards[2];
        home.handle_event(&TuiEvent::MouseClick(card.x + 1, card.y + 1));
        assert_eq!(home.active_feature(), 2);

        let button = home.button;
        assert_eq!(
            home.handle_event(&TuiEvent::MouseClick(button.x + 1, button.y + 1)),
            Some(HomeEvent::StartExploring)
        );
    }
}
