use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CostSummary, TitleBar};

const HELP_TEXT: &str = " Tab/↑↓ move  ←→ adjust  Space toggle  Enter select  Esc quit";

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [form_area, summary_area] =
        Layout::horizontal([Percentage(60), Percentage(40)]).areas(main_area);

    TitleBar::new(tui.form.trip.destination.clone(), tui.status_message.clone())
        .render(frame, title_area);

    tui.form.render(frame, form_area);

    CostSummary::new(&tui.breakdown, tui.displayed_total).render(frame, summary_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
