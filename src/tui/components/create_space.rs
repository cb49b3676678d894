//! # Create Space Prompt
//!
//! Modal overlay for starting a shared trip space from the current search.
//! The owner keeps it as `Option<CreateSpacePrompt>`: `Some` while open,
//! dropped on close, so nothing lingers between openings.
//!
//! Esc or a click outside the dialog closes it. Enter confirms, except on
//! the Cancel button.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::search::MIN_PARTY_SIZE;
use crate::core::space::{CreateSpacePayload, Visibility};
use crate::tui::component::{Component, EventHandler, hit};
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;

const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptField {
    #[default]
    Name,
    Visibility,
    Travelers,
    Cancel,
    Create,
}

impl PromptField {
    const ORDER: [PromptField; 5] = [
        PromptField::Name,
        PromptField::Visibility,
        PromptField::Travelers,
        PromptField::Cancel,
        PromptField::Create,
    ];

    fn step(self, delta: usize) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + delta) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateSpaceEvent {
    Confirm(CreateSpacePayload),
    Close,
}

#[derive(Debug, Default)]
struct Targets {
    dialog: Rect,
    visibility: Vec<(Rect, Visibility)>,
    minus: Rect,
    plus: Rect,
    cancel: Rect,
    create: Rect,
}

pub struct CreateSpacePrompt {
    defaults: CreateSpacePayload,
    name: TextField,
    visibility: Visibility,
    people: u32,
    focus: PromptField,
    targets: Targets,
}

impl CreateSpacePrompt {
    pub fn new(defaults: CreateSpacePayload) -> Self {
        let mut name = TextField::new("Trip name")
            .with_placeholder(defaults.default_name())
            .with_value(defaults.name.clone());
        name.focused = true;
        Self {
            visibility: defaults.visibility,
            people: defaults.people.max(MIN_PARTY_SIZE),
            defaults,
            name,
            focus: PromptField::Name,
            targets: Targets::default(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn people(&self) -> u32 {
        self.people
    }

    pub fn payload(&self) -> CreateSpacePayload {
        CreateSpacePayload {
            name: self.name.value().to_string(),
            visibility: self.visibility,
            people: self.people,
            ..self.defaults.clone()
        }
        .finalized()
    }

    fn set_focus(&mut self, field: PromptField) {
        self.focus = field;
        self.name.focused = field == PromptField::Name;
    }

    fn decrement(&mut self) {
        self.people = self.people.saturating_sub(1).max(MIN_PARTY_SIZE);
    }

    fn increment(&mut self) {
        self.people = self.people.saturating_add(1);
    }

    fn handle_click(&mut self, col: u16, row: u16) -> Option<CreateSpaceEvent> {
        let t = &self.targets;
        if !hit(t.dialog, col, row) {
            return Some(CreateSpaceEvent::Close);
        }
        if hit(t.cancel, col, row) {
            return Some(CreateSpaceEvent::Close);
        }
        if hit(t.create, col, row) {
            return Some(CreateSpaceEvent::Confirm(self.payload()));
        }
        if let Some((_, v)) = t.visibility.iter().find(|(r, _)| hit(*r, col, row)) {
            self.visibility = *v;
            self.set_focus(PromptField::Visibility);
        } else if hit(t.minus, col, row) {
            self.decrement();
            self.set_focus(PromptField::Travelers);
        } else if hit(t.plus, col, row) {
            self.increment();
            self.set_focus(PromptField::Travelers);
        } else if self.name.handle_event(&TuiEvent::MouseClick(col, row)).is_some() {
            self.set_focus(PromptField::Name);
        }
        None
    }
}

impl EventHandler for CreateSpacePrompt {
    type Event = CreateSpaceEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CreateSpaceEvent> {
        if let Some((col, row)) = event.click_position() {
            return self.handle_click(col, row);
        }
        match (event, self.focus) {
            (TuiEvent::Escape, _) | (TuiEvent::Submit, PromptField::Cancel) => Some(CreateSpaceEvent::Close),
            (TuiEvent::Submit, _) => Some(CreateSpaceEvent::Confirm(self.payload())),
            (TuiEvent::NextField, _) => {
                self.set_focus(self.focus.step(1));
                None
            }
            (TuiEvent::PrevField, _) => {
                self.set_focus(self.focus.step(PromptField::ORDER.len() - 1));
                None
            }
            (TuiEvent::CursorLeft, PromptField::Visibility) => {
                self.visibility = self.visibility.prev();
                None
            }
            (TuiEvent::CursorRight, PromptField::Visibility) => {
                self.visibility = self.visibility.next();
                None
            }
            (TuiEvent::CursorLeft | TuiEvent::CursorDown | TuiEvent::InputChar('-'), PromptField::Travelers) => {
                self.decrement();
                None
            }
            (TuiEvent::CursorRight | TuiEvent::CursorUp | TuiEvent::InputChar('+'), PromptField::Travelers) => {
                self.increment();
                None
            }
            (_, PromptField::Name) => {
                self.name.handle_event(event);
                None
            }
            _ => None,
        }
    }
}

impl Component for CreateSpacePrompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [dialog] = Layout::horizontal([Constraint::Length(DIALOG_WIDTH.min(area.width))])
            .flex(Flex::Center)
            .areas(area);
        let [dialog] = Layout::vertical([Constraint::Length(DIALOG_HEIGHT.min(area.height))])
            .flex(Flex::Center)
            .areas(dialog);
        frame.render_widget(Clear, dialog);
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(" Create Space ", Style::default().add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(" Tab next · Enter create · Esc close ").centered());
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);
        self.targets = Targets {
            dialog,
            ..Default::default()
        };

        let [name_area, dates_area, vis_label, vis_area, help_area, people_area, context_area, buttons_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .horizontal_margin(1)
            .areas(inner);

        self.name.render(frame, name_area);

        let dim = Style::default().fg(Color::Gray);
        let dates = format!(
            "Start {}   End {}",
            self.defaults.start.as_deref().unwrap_or("—"),
            self.defaults.end.as_deref().unwrap_or("—"),
        );
        frame.render_widget(Paragraph::new(dates).style(dim), dates_area);

        let label = |text: &'static str, focused: bool| {
            let style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(text, style)
        };
        frame.render_widget(
            Paragraph::new(label("Visibility", self.focus == PromptField::Visibility)),
            vis_label,
        );

        let mut x = vis_area.x;
        let mut spans = Vec::new();
        for v in Visibility::ALL {
            let text = format!("{} {} ", if v == self.visibility { "◉" } else { "○" }, v.label());
            let width = text.chars().count() as u16;
            self.targets.visibility.push((Rect::new(x, vis_area.y, width, 1), v));
            let style = if v == self.visibility { Style::default().fg(Color::Cyan) } else { dim };
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), vis_area);
        frame.render_widget(
            Paragraph::new(
                "Private: only you can see and plan. Friends-only: listed, join with a code. \
                 Public: anyone can join.",
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::DarkGray)),
            help_area,
        );

        let people = Line::from(vec![
            label("Travelers", self.focus == PromptField::Travelers),
            Span::raw("   "),
            Span::styled("[−]", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {:>2} ", self.people)),
            Span::styled("[+]", Style::default().fg(Color::Cyan)),
        ]);
        // "Travelers" (9) + 3 spaces, then "[−]", the count, "[+]"
        self.targets.minus = Rect::new(people_area.x + 12, people_area.y, 3, 1);
        self.targets.plus = Rect::new(people_area.x + 19, people_area.y, 3, 1);
        frame.render_widget(Paragraph::new(people), people_area);

        if let Some(city) = &self.defaults.city {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("Planning context: ", dim),
                    Span::styled(city.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ])),
                context_area,
            );
        }

        let [cancel, create] = Layout::horizontal([Constraint::Length(10), Constraint::Length(16)])
            .flex(Flex::End)
            .spacing(2)
            .areas(buttons_area);
        self.targets.cancel = cancel;
        self.targets.create = create;
        let button = |text: &'static str, focused: bool, primary: bool| {
            let mut style = if primary {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            if focused {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            Paragraph::new(text).centered().style(style)
        };
        frame.render_widget(button("Cancel", self.focus == PromptField::Cancel, false), cancel);
        frame.render_widget(button("Create Space", self.focus == PromptField::Create, true), create);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::SearchCriteria;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn lisbon() -> CreateSpacePayload {
        CreateSpacePayload::from_criteria(&SearchCriteria {
            city: "Lisbon".to_string(),
            start: "2025-09-01".to_string(),
            end: "2025-09-05".to_string(),
            people: 3,
            ..SearchCriteria::default()
        })
    }

    fn render(prompt: &mut CreateSpacePrompt) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| prompt.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_defaults_and_confirm() {
        let mut prompt = CreateSpacePrompt::new(lisbon());
        assert_eq!(prompt.visibility(), Visibility::Friends);
        assert_eq!(prompt.people(), 3);
        let Some(CreateSpaceEvent::Confirm(payload)) = prompt.handle_event(&TuiEvent::Submit) else {
            panic!("expected confirm");
        };
        assert_eq!(payload.name, "Lisbon — 2025-09-01 → 2025-09-05");
        assert_eq!(payload.city.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_blank_name_falls_back_to_default() {
        let mut prompt = CreateSpacePrompt::new(lisbon());
        for _ in 0..40 {
            prompt.handle_event(&TuiEvent::Backspace);
        }
        assert_eq!(prompt.payload().name, "Lisbon — 2025-09-01 → 2025-09-05");
    }

    #[test]
    fn test_stepper_has_floor_of_one() {
        let mut prompt = CreateSpacePrompt::new(CreateSpacePayload::from_criteria(&SearchCriteria {
            people: 1,
            ..SearchCriteria::default()
        }));
        prompt.handle_event(&TuiEvent::NextField);
        prompt.handle_event(&TuiEvent::NextField);
        prompt.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(prompt.people(), 1);
        prompt.handle_event(&TuiEvent::InputChar('+'));
        assert_eq!(prompt.people(), 2);
    }

    #[test]
    fn test_visibility_cycles() {
        let mut prompt = CreateSpacePrompt::new(lisbon());
        prompt.handle_event(&TuiEvent::NextField);
        prompt.handle_event(&TuiEvent::CursorRight);
        assert_eq!(prompt.visibility(), Visibility::Public);
        prompt.handle_event(&TuiEvent::CursorRight);
        assert_eq!(prompt.visibility(), Visibility::Private);
    }

    #[test]
    fn test_escape_and_cancel_close() {
        let mut prompt = CreateSpacePrompt::new(lisbon());
        assert_eq!(prompt.handle_event(&TuiEvent::Escape), Some(CreateSpaceEvent::Close));
        prompt.handle_event(&TuiEvent::PrevField);
        prompt.handle_event(&TuiEvent::PrevField);
        assert_eq!(prompt.handle_event(&TuiEvent::Submit), Some(CreateSpaceEvent::Close));
    }

    #[test]
    fn test_clicks() {
        let mut prompt = CreateSpacePrompt::new(lisbon());
        let text = render(&mut prompt);
        assert!(text.contains("Create Space"));
        assert!(text.contains("Planning context: Lisbon"));
        assert!(text.contains("Friends-only"));

        let (public, _) = prompt.targets.visibility[2];
        prompt.handle_event(&TuiEvent::MouseClick(public.x, public.y));
        assert_eq!(prompt.visibility(), Visibility::Public);

        let plus = prompt.targets.plus;
        prompt.handle_event(&TuiEvent::MouseClick(plus.x + 1, plus.y));
        assert_eq!(prompt.people(), 4);

        assert_eq!(prompt.handle_event(&TuiEvent::MouseClick(0, 0)), Some(CreateSpaceEvent::Close));
    }
}
