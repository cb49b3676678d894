use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global shortcuts
    ForceQuit,   // Ctrl+C
    GoHome,      // Ctrl+G
    GoSearch,    // Ctrl+F
    ToggleLogin, // Ctrl+L
    NewSpace,    // Ctrl+N

    // Focused-component events
    Submit,
    Escape,
    NextField,
    PrevField,
    InputChar(char),
    Paste(String),
    Backspace,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    PageUp,
    PageDown,

    // Pointer
    MouseClick(u16, u16),
    ScrollUp,
    ScrollDown,

    Resize,
}

impl TuiEvent {
    /// Screen position of a pointer press, if this is one.
    pub fn click_position(&self) -> Option<(u16, u16)> {
        match self {
            TuiEvent::MouseClick(col, row) => Some((*col, *row)),
            _ => None,
        }
    }
}

/// Poll for an event with timeout
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(ev) => translate(ev),
            Err(e) => {
                log::warn!("Failed to read terminal event: {e}");
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            log::warn!("Failed to poll terminal events: {e}");
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Map a raw crossterm event onto a `TuiEvent`.
pub fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => {
            // Kitty keyboard protocol reports releases too
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(TuiEvent::GoHome),
                (KeyModifiers::CONTROL, KeyCode::Char('f')) => Some(TuiEvent::GoSearch),
                (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(TuiEvent::ToggleLogin),
                (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::NewSpace),
                (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => None,
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Tab) => Some(TuiEvent::NextField),
                (_, KeyCode::BackTab) => Some(TuiEvent::PrevField),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
