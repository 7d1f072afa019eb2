//! # TripForm Component
//!
//! The estimator's input side: destination field, duration slider, service
//! toggles, hotel tier selector and the booking button.
//!
//! ## State Management
//!
//! Focus is internal state. The trip itself is a prop copied from the
//! `Estimator` before each frame; the form never mutates it; it only emits
//! `Action`s for the core to apply.
//!
//! The tier row is hidden while the hotel is off, matching the services it
//! prices. Slider input is clamped here, so the core always receives
//! `1..=30` days.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::core::trip::{
    MAX_DURATION_DAYS, TripConfiguration, clamp_duration_days, next_hotel_tier, prev_hotel_tier,
};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Slider track width in cells.
const SLIDER_WIDTH: usize = MAX_DURATION_DAYS as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Destination,
    Duration,
    Flights,
    Hotel,
    HotelTier,
    GroundTransport,
    Book,
}

pub struct TripForm {
    /// Current trip (Prop)
    pub trip: TripConfiguration,
    /// Focused row (Internal State)
    focus: FormRow,
}

impl TripForm {
    pub fn new(trip: TripConfiguration) -> Self {
        Self {
            trip,
            focus: FormRow::Destination,
        }
    }

    pub fn focus(&self) -> FormRow {
        self.focus
    }

    /// Rows currently shown, top to bottom.
    pub fn visible_rows(&self) -> Vec<FormRow> {
        let mut rows = vec![
            FormRow::Destination,
            FormRow::Duration,
            FormRow::Flights,
            FormRow::Hotel,
        ];
        if self.trip.include_hotel {
            rows.push(FormRow::HotelTier);
        }
        rows.push(FormRow::GroundTransport);
        rows.push(FormRow::Book);
        rows
    }

    fn move_focus(&mut self, step: isize) {
        let rows = self.visible_rows();
        let current = match rows.iter().position(|&r| r == self.focus) {
            Some(i) => i as isize,
            // Focused row was hidden; fall back to the hotel toggle that hid it
            None => rows.iter().position(|&r| r == FormRow::Hotel).unwrap_or(0) as isize,
        };
        let len = rows.len() as isize;
        self.focus = rows[(current + step).rem_euclid(len) as usize];
    }

    fn toggle(&self) -> Option<Action> {
        match self.focus {
            FormRow::Flights => Some(Action::SetIncludeFlights(!self.trip.include_flights)),
            FormRow::Hotel => Some(Action::SetIncludeHotel(!self.trip.include_hotel)),
            FormRow::GroundTransport => Some(Action::SetIncludeGroundTransport(
                !self.trip.include_ground_transport,
            )),
            _ => None,
        }
    }

    fn adjust(&self, step: i64) -> Option<Action> {
        match self.focus {
            FormRow::Duration => {
                let days = clamp_duration_days(i64::from(self.trip.duration_days) + step);
                (days != self.trip.duration_days).then_some(Action::SetDurationDays(days))
            }
            FormRow::HotelTier => {
                let tier = if step > 0 {
                    next_hotel_tier(self.trip.hotel_tier)
                } else {
                    prev_hotel_tier(self.trip.hotel_tier)
                };
                Some(Action::SetHotelTier(tier))
            }
            _ => self.toggle(),
        }
    }

    fn edit_destination(&self, edit: impl FnOnce(&mut String)) -> Option<Action> {
        let mut destination = self.trip.destination.clone();
        edit(&mut destination);
        (destination != self.trip.destination).then_some(Action::SetDestination(destination))
    }

    fn row_line(&self, row: FormRow) -> Line<'static> {
        let focused = row == self.focus;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::styled(marker, label_style)];
        match row {
            FormRow::Destination => {
                spans.push(Span::styled("Destination      ", label_style));
                spans.push(Span::styled(
                    format!("[{}]", self.trip.destination),
                    Style::default().fg(Color::White),
                ));
            }
            FormRow::Duration => {
                let days = self.trip.duration_days as usize;
                spans.push(Span::styled(
                    format!("Trip Duration: {:>2} days  ", days),
                    label_style,
                ));
                spans.push(Span::raw("◀ "));
                spans.push(Span::styled("█".repeat(days), Style::default().fg(Color::Cyan)));
                spans.push(Span::styled(
                    "░".repeat(SLIDER_WIDTH.saturating_sub(days)),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::raw(" ▶"));
            }
            FormRow::Flights => {
                spans.extend(checkbox(self.trip.include_flights, "Round-trip Flights", label_style))
            }
            FormRow::Hotel => {
                spans.extend(checkbox(self.trip.include_hotel, "Hotel Accommodation", label_style))
            }
            FormRow::HotelTier => {
                spans.push(Span::styled("    Hotel Quality  ", label_style));
                spans.push(Span::raw("◀ "));
                spans.push(Span::styled(
                    tier_label(self.trip.hotel_tier),
                    Style::default().fg(Color::Yellow),
                ));
                spans.push(Span::raw(" ▶"));
            }
            FormRow::GroundTransport => spans.extend(checkbox(
                self.trip.include_ground_transport,
                "Private Cab for Sightseeing",
                label_style,
            )),
            FormRow::Book => {
                let style = if focused {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                spans.push(Span::styled(" Save Itinerary & Book → ", style));
            }
        }
        Line::from(spans)
    }
}

fn checkbox(checked: bool, label: &'static str, style: Style) -> [Span<'static>; 2] {
    let mark = if checked { "[x] " } else { "[ ] " };
    [Span::styled(mark, style), Span::styled(label, style)]
}

pub fn tier_label(tier: u8) -> String {
    match tier {
        5 => "5-Star Luxury Hotel".to_string(),
        other => format!("{other}-Star Hotel"),
    }
}

impl EventHandler for TripForm {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::FocusNext => {
                self.move_focus(1);
                None
            }
            TuiEvent::FocusPrev => {
                self.move_focus(-1);
                None
            }
            TuiEvent::Left => self.adjust(-1),
            TuiEvent::Right => self.adjust(1),
            TuiEvent::Submit => match self.focus {
                FormRow::Book => Some(Action::Book),
                FormRow::Destination => {
                    self.move_focus(1);
                    None
                }
                _ => self.toggle(),
            },
            TuiEvent::InputChar(c) if self.focus == FormRow::Destination => {
                self.edit_destination(|d| d.push(*c))
            }
            TuiEvent::Paste(text) if self.focus == FormRow::Destination => {
                // Single-line field
                let line = text.lines().next().unwrap_or_default().to_string();
                self.edit_destination(|d| d.push_str(&line))
            }
            TuiEvent::Backspace if self.focus == FormRow::Destination => {
                self.edit_destination(|d| {
                    d.pop();
                })
            }
            TuiEvent::InputChar(' ') => self.toggle(),
            _ => None,
        }
    }
}

impl Component for TripForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = self.visible_rows();
        let mut lines = Vec::with_capacity(rows.len() * 2);
        for row in &rows {
            lines.push(self.row_line(*row));
            lines.push(Line::default());
        }

        let block = Block::bordered()
            .title(" Trip Cost Estimator ")
            .title_bottom(Line::from(" Customize your trip to see a real-time price estimate ").centered())
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(1, 1, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(lines).block(block), area);

        // Text cursor at the end of the destination field
        if self.focus == FormRow::Destination {
            let prefix = "▸ Destination      [".width() as u16;
            let x = inner.x + prefix + self.trip.destination.width() as u16;
            if x < inner.right() && inner.height > 0 {
                frame.set_cursor_position(Position::new(x, inner.y));
            }
        }
    }
}
