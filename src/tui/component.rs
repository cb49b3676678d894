use ratatui::Frame;
use ratatui::layout::{Position, Rect};

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields; `render` takes `&mut self` so a component
/// can record what it learned while drawing (its bounds, a scroll window)
/// for the next round of event handling.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal events into its own events.
pub trait EventHandler {
    /// The high-level event this component emits to its parent.
    type Event;

    /// Handle a `TuiEvent`, optionally emitting a high-level event.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}

/// Whether a screen cell lies inside `area`.
pub fn hit(area: Rect, col: u16, row: u16) -> bool {
    area.contains(Position::new(col, row))
}
