//! # CostSummary Component
//!
//! Itemized breakdown plus the animated total.
//!
//! Stateless: both props come straight from the estimator's watch channels.
//! The line items always show the latest breakdown, while the total shows
//! whatever number the counter animation has reached.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::pricing::CostBreakdown;
use crate::tui::component::Component;

pub struct CostSummary<'a> {
    pub breakdown: &'a CostBreakdown,
    /// Current frame of the animated total
    pub displayed_total: i64,
}

impl<'a> CostSummary<'a> {
    pub fn new(breakdown: &'a CostBreakdown, displayed_total: i64) -> Self {
        Self {
            breakdown,
            displayed_total,
        }
    }
}

impl Component for CostSummary<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Breakdown ")
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [items_area, total_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(inner);

        let width = items_area.width as usize;
        let lines: Vec<Line> = self
            .breakdown
            .line_items
            .iter()
            .map(|item| {
                let amount = format!("${}", item.amount);
                let gap = width.saturating_sub(item.label.chars().count() + amount.len());
                Line::from(vec![
                    Span::raw(item.label.clone()),
                    Span::raw(" ".repeat(gap)),
                    Span::styled(amount, Style::default().fg(Color::Gray)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), items_area);

        let total = vec![
            Line::from(Span::styled(
                "Estimated Total Cost",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("$ {}", self.displayed_total),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(total), total_area);
    }
}
