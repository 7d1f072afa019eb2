//! # TitleBar Component
//!
//! Top status line: app name, destination being priced, and a transient
//! status message (e.g. "Updating estimate…" while the total animates).
//!
//! Purely presentational; every field is a prop.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub struct TitleBar {
    pub destination: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(destination: String, status_message: String) -> Self {
        Self {
            destination,
            status_message,
        }
    }

    fn text(&self) -> String {
        let destination = if self.destination.trim().is_empty() {
            "anywhere"
        } else {
            self.destination.as_str()
        };
        if self.status_message.is_empty() {
            format!("Wayfare (trip to {destination})")
        } else {
            format!("Wayfare (trip to {destination}) | {}", self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Span::styled(self.text(), Style::default().fg(Color::Cyan)),
            area,
        );
    }
}
