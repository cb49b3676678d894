//! # Attraction Detail Page
//!
//! ```text
//! National Museum of Art
//! Lisbon, Praça do Império · ★ 4.6 (1287 reviews)
//! ╭ Photo 1 of 6 ──────────────────────╮ ╭ Choose a day… ▾╮
//! │      /images/tirana4.jpg           │ ╰────────────────╯
//! ╰────────────────────────────────────╯
//! ╭ Overview ──────────────────────────────────────────────╮
//! │ ...                                                    │
//! ```
//!
//! Focus cycles gallery → add to trip → sections with Tab. The sections
//! scroll inside a `ScrollView`; their heights are computed up front with
//! `textwrap` and the text is drawn pre-wrapped so the two always agree.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::catalog::price_symbols;
use crate::core::detail::AttractionDetail;
use crate::core::state::DetailView;
use crate::tui::component::Component;
use crate::tui::components::add_to_trip::{AddToTrip, AddToTripEvent, AddToTripState};
use crate::tui::components::carousel::{Carousel, CarouselState};
use crate::tui::event::TuiEvent;
use crate::tui::text::{rating_label, truncate};

/// Border (2) + padding (2).
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 2;
const GALLERY_HEIGHT: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFocus {
    #[default]
    Gallery,
    AddToTrip,
    Sections,
}

impl DetailFocus {
    fn next(self) -> Self {
        match self {
            DetailFocus::Gallery => DetailFocus::AddToTrip,
            DetailFocus::AddToTrip => DetailFocus::Sections,
            DetailFocus::Sections => DetailFocus::Gallery,
        }
    }

    fn prev(self) -> Self {
        match self {
            DetailFocus::Gallery => DetailFocus::Sections,
            DetailFocus::AddToTrip => DetailFocus::Gallery,
            DetailFocus::Sections => DetailFocus::AddToTrip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    /// ISO date picked in the add-to-trip dropdown.
    AddToTrip(String),
    Back,
}

/// One titled block of text on the page.
struct Section {
    title: &'static str,
    lines: Vec<Line<'static>>,
}

impl Section {
    fn text(title: &'static str, body: &str, width: usize) -> Self {
        Self {
            title,
            lines: wrap(body, width, Style::default()),
        }
    }

    fn height(&self) -> u16 {
        (self.lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl Widget for &Section {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);
        let padded = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height);
        Paragraph::new(self.lines.clone()).render(padded, buf);
    }
}

fn wrap(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    if width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text.trim(), options)
        .into_iter()
        .map(|l| Line::styled(l.into_owned(), style))
        .collect()
}

/// `$` repeated by price level, or "Not specified".
pub fn price_fact(level: Option<u8>) -> String {
    price_symbols(level, '$').unwrap_or_else(|| "Not specified".to_string())
}

fn sections(detail: &AttractionDetail, width: usize) -> Vec<Section> {
    let mut out = vec![Section::text("Overview", detail.overview_text(), width)];

    let mut prices = wrap(detail.prices_text(), width, Style::default());
    prices.push(Line::from(""));
    prices.push(Line::styled("Opening hours", Style::default().add_modifier(Modifier::BOLD)));
    prices.extend(wrap(detail.opening_hours_text(), width, Style::default()));
    out.push(Section { title: "Prices & Hours", lines: prices });

    if !detail.reviews.is_empty() {
        let mut lines = Vec::new();
        for (i, review) in detail.reviews.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![
                Span::styled(review.author.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(rating_label(review.rating), Style::default().fg(Color::Yellow)),
            ]));
            lines.extend(wrap(&review.text, width, Style::default().fg(Color::Gray)));
        }
        out.push(Section { title: "Visitor Reviews", lines });
    }

    out.push(Section::text("Additional Information", detail.about_text(), width));

    let fact = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<20}"), Style::default().fg(Color::Gray)),
            Span::raw(value),
        ])
    };
    out.push(Section {
        title: "Quick Facts",
        lines: vec![
            fact("Price Level", price_fact(detail.price_level)),
            fact("Category", "Museum".to_string()),
            fact("Duration", "2-3 hours".to_string()),
            fact("Best Time to Visit", "Weekday mornings".to_string()),
        ],
    });
    out
}

pub struct DetailPageState {
    pub focus: DetailFocus,
    pub carousel: CarouselState,
    pub add_to_trip: AddToTripState,
    pub scroll: ScrollViewState,
    photo_count: usize,
}

impl DetailPageState {
    pub fn new(trip_dates: Vec<String>) -> Self {
        Self {
            focus: DetailFocus::default(),
            carousel: CarouselState::default(),
            add_to_trip: AddToTripState::new(trip_dates),
            scroll: ScrollViewState::default(),
            photo_count: 0,
        }
    }

    /// Fresh page for a newly opened attraction.
    pub fn reset(&mut self) {
        self.focus = DetailFocus::default();
        self.carousel = CarouselState::default();
        self.add_to_trip.dropdown.close();
        self.scroll = ScrollViewState::default();
    }

    pub fn is_overlay_open(&self) -> bool {
        self.carousel.is_lightbox_open() || self.add_to_trip.dropdown.is_open()
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        if event.click_position().is_some() {
            if self.carousel.is_lightbox_open() {
                self.carousel.handle_event(event, self.photo_count);
                return None;
            }
            // The dropdown sees every click so it can close on an outside one
            let was_open = self.add_to_trip.dropdown.is_open();
            match self.add_to_trip.handle_event(event) {
                Some(AddToTripEvent::Pick(date)) => return Some(DetailEvent::AddToTrip(date)),
                Some(AddToTripEvent::Dismissed) => return None,
                None => {}
            }
            if was_open || self.add_to_trip.dropdown.is_open() {
                self.focus = DetailFocus::AddToTrip;
            } else if self.carousel.handle_event(event, self.photo_count) {
                self.focus = DetailFocus::Gallery;
            }
            return None;
        }

        if self.carousel.is_lightbox_open() {
            self.carousel.handle_event(event, self.photo_count);
            return None;
        }
        if self.add_to_trip.dropdown.is_open() {
            return match self.add_to_trip.handle_event(event)? {
                AddToTripEvent::Pick(date) => Some(DetailEvent::AddToTrip(date)),
                AddToTripEvent::Dismissed => None,
            };
        }

        match event {
            TuiEvent::NextField => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::PrevField => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::Escape => Some(DetailEvent::Back),
            _ => {
                match self.focus {
                    DetailFocus::Gallery => {
                        self.carousel.handle_event(event, self.photo_count);
                    }
                    DetailFocus::AddToTrip => {
                        if *event == TuiEvent::Submit {
                            self.add_to_trip.dropdown.open();
                        }
                    }
                    DetailFocus::Sections => self.scroll_sections(event),
                }
                None
            }
        }
    }

    fn scroll_sections(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.scroll.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.scroll.scroll_down(),
            TuiEvent::PageUp => self.scroll.scroll_page_up(),
            TuiEvent::PageDown => self.scroll.scroll_page_down(),
            _ => {}
        }
    }
}

/// Transient render wrapper.
pub struct DetailPage<'a> {
    state: &'a mut DetailPageState,
    view: &'a DetailView,
    is_narrow: bool,
}

impl<'a> DetailPage<'a> {
    pub fn new(state: &'a mut DetailPageState, view: &'a DetailView, is_narrow: bool) -> Self {
        Self { state, view, is_narrow }
    }

    /// Lightbox and the add-to-trip popup. Call last.
    pub fn render_overlays(&mut self, frame: &mut Frame) {
        let view = self.view;
        let DetailView::Ready(detail) = view else {
            return;
        };
        let focused = self.state.focus == DetailFocus::AddToTrip;
        AddToTrip::new(&mut self.state.add_to_trip, focused).render_popup(frame);
        Carousel::new(&mut self.state.carousel, &detail.photos, true).render_lightbox(frame);
    }

    fn render_message(frame: &mut Frame, area: Rect, title: &str, body: &str, color: Color) {
        let lines = vec![
            Line::from(""),
            Line::styled(title.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Line::styled(body.to_string(), Style::default().fg(Color::Gray)),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), area);
    }

    fn render_ready(&mut self, frame: &mut Frame, area: Rect, detail: &AttractionDetail) {
        self.state.photo_count = detail.photos.len();

        let [header_area, top_area, body_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(if self.is_narrow { GALLERY_HEIGHT + 3 } else { GALLERY_HEIGHT }),
            Constraint::Fill(1),
        ])
        .areas(area);

        let mut meta = vec![Span::styled(detail.location_line(), Style::default().fg(Color::Gray))];
        if let Some(rating) = detail.rating {
            meta.push(Span::raw(" · "));
            meta.push(Span::styled(rating_label(rating), Style::default().fg(Color::Yellow)));
            if let Some(total) = detail.user_ratings_total {
                meta.push(Span::styled(format!(" ({total} reviews)"), Style::default().fg(Color::Gray)));
            }
        }
        let header = vec![
            Line::styled(
                truncate(&detail.name, usize::from(area.width)),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(meta),
        ];
        frame.render_widget(Paragraph::new(header), header_area);

        let (gallery_area, trip_area) = if self.is_narrow {
            let [g, t] = Layout::vertical([Constraint::Length(GALLERY_HEIGHT), Constraint::Length(3)]).areas(top_area);
            (g, t)
        } else {
            let [g, t] = Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(top_area);
            (g, Rect { height: 3, ..t })
        };
        let focus = self.state.focus;
        Carousel::new(&mut self.state.carousel, &detail.photos, focus == DetailFocus::Gallery)
            .render(frame, gallery_area);
        AddToTrip::new(&mut self.state.add_to_trip, focus == DetailFocus::AddToTrip).render(frame, trip_area);

        // Sections scroll under the gallery
        let content_width = body_area.width.saturating_sub(1);
        let text_width = usize::from(content_width.saturating_sub(HORIZONTAL_OVERHEAD));
        let sections = sections(detail, text_width);
        let total: u16 = sections.iter().map(Section::height).sum();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        let mut y = 0;
        for section in &sections {
            let height = section.height();
            scroll_view.render_widget(section, Rect::new(0, y, content_width, height));
            y += height;
        }
        frame.render_stateful_widget(scroll_view, body_area, &mut self.state.scroll);
    }
}

impl Component for DetailPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let view = self.view;
        match view {
            DetailView::Ready(detail) => self.render_ready(frame, area, detail),
            DetailView::Loading(_) | DetailView::Idle => {
                Self::render_message(frame, area, "Loading attraction…", "Fetching details", Color::Yellow)
            }
            DetailView::Failed { place_id, message } => Self::render_message(
                frame,
                area,
                &format!("Could not load {place_id}"),
                &format!("{message} · Esc to go back"),
                Color::Red,
            ),
        }
    }
}
