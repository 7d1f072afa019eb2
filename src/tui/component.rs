use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields; `render` takes `&mut self` so a component
/// can keep per-frame caches (e.g. the area it last drew into).
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns terminal events into its own higher-level events.
pub trait EventHandler {
    type Event;

    /// Returns `None` when the event was absorbed locally (or ignored).
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
