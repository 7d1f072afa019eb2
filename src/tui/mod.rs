//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the estimator,
//! and translates keyboard events into `core::action::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop reads the estimator's two watch channels (breakdown and animated
//! total) and only draws when one of them changed or an input arrived:
//!
//! - **Animating**: polls at the configured frame rate so every counter frame
//!   reaches the screen.
//! - **Idle**: sleeps up to 500ms, redrawing only on events or resize.
//!
//! A `SteadyBlock` cursor is used for the destination field because ratatui
//! repositions the cursor on every `draw()`, which makes blinking cursors
//! flicker during the count-up animation.

mod component;
pub mod components;
mod event;
mod ui;

use log::info;
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::sync::watch;

use crate::core::action::{Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::interpolator::ValueInterpolator;
use crate::core::pricing::CostBreakdown;
use crate::core::state::{Estimator, ItinerarySummary};
use crate::tui::component::EventHandler;
use crate::tui::components::TripForm;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);
const ANIMATING_STATUS: &str = "Updating estimate…";

/// TUI-specific presentation state (not part of the core)
pub struct TuiState {
    pub form: TripForm,
    /// Latest breakdown seen on the estimator's channel
    pub breakdown: CostBreakdown,
    /// Latest counter frame
    pub displayed_total: i64,
    pub status_message: String,
}

impl TuiState {
    pub fn new(estimator: &Estimator) -> Self {
        Self {
            form: TripForm::new(estimator.config().clone()),
            breakdown: estimator.breakdown(),
            displayed_total: estimator.displayed_value(),
            status_message: String::new(),
        }
    }

    /// Copy in whatever the channels published since the last call.
    /// Returns true if anything visible changed.
    pub fn sync(
        &mut self,
        breakdown_rx: &mut watch::Receiver<CostBreakdown>,
        display_rx: &mut watch::Receiver<i64>,
    ) -> bool {
        let mut changed = false;
        if breakdown_rx.has_changed().unwrap_or(false) {
            self.breakdown = breakdown_rx.borrow_and_update().clone();
            changed = true;
        }
        if display_rx.has_changed().unwrap_or(false) {
            self.displayed_total = *display_rx.borrow_and_update();
            changed = true;
        }
        changed
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Cursor marks the destination field
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids flicker from per-frame redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Run the estimator until the traveller quits or books.
///
/// Returns the itinerary when they chose to book.
pub fn run(config: ResolvedConfig) -> std::io::Result<Option<ItinerarySummary>> {
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate.max(1)));
    let mut estimator = Estimator::new(
        config.table,
        config.trip,
        ValueInterpolator::new(config.animation_duration, config.frame_rate),
    );
    let mut breakdown_rx = estimator.subscribe_breakdown();
    let mut display_rx = estimator.subscribe_display();
    let mut tui = TuiState::new(&estimator);

    let mut terminal = ratatui::try_init()?;
    let terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(
        &mut terminal,
        &mut estimator,
        &mut tui,
        &mut breakdown_rx,
        &mut display_rx,
        frame_interval,
    );

    estimator.teardown();
    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    estimator: &mut Estimator,
    tui: &mut TuiState,
    breakdown_rx: &mut watch::Receiver<CostBreakdown>,
    display_rx: &mut watch::Receiver<i64>,
    frame_interval: Duration,
) -> std::io::Result<Option<ItinerarySummary>> {
    let mut needs_redraw = true; // Force first frame
    let mut was_animating = false;

    loop {
        let animating = estimator.is_animating();
        if animating != was_animating {
            tui.status_message = if animating {
                ANIMATING_STATUS.to_string()
            } else {
                String::new()
            };
            was_animating = animating;
            needs_redraw = true;
        }
        if tui.sync(breakdown_rx, display_rx) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { frame_interval } else { IDLE_POLL };
        let mut next = poll_event_timeout(timeout)?;

        // Process first event + drain ALL pending events before next draw
        while let Some(event) = next {
            needs_redraw = true;
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit | TuiEvent::Escape => {
                    info!("Estimator closed");
                    return Ok(None);
                }
                other => {
                    if let Some(action) = tui.form.handle_event(&other) {
                        match update(estimator, action) {
                            Effect::Quit => return Ok(None),
                            Effect::Book(summary) => return Ok(Some(summary)),
                            Effect::None => {}
                        }
                        // Later events in this batch must see the applied change
                        tui.form.trip = estimator.config().clone();
                    }
                }
            }
            next = poll_event_immediate()?;
        }
    }
}
