//! # Estimator State
//!
//! The one owner of the trip being priced.
//!
//! ```text
//! Estimator
//! ├── table: PricingTable                    // immutable rates
//! ├── config: TripConfiguration              // current options
//! ├── breakdown: watch::Sender<CostBreakdown> // latest priced result
//! └── counter: ValueInterpolator             // animated total
//! ```
//!
//! Every setter recomputes synchronously before returning, so the published
//! breakdown always belongs to the configuration just applied.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::core::interpolator::{AnimationHandle, AnimationPhase, ValueInterpolator};
use crate::core::pricing::{CostBreakdown, PricingTable, compute};
use crate::core::trip::TripConfiguration;

pub struct Estimator {
    table: PricingTable,
    config: TripConfiguration,
    breakdown: watch::Sender<CostBreakdown>,
    counter: ValueInterpolator,
    animation: Option<AnimationHandle>,
}

impl Estimator {
    /// Prices `config` right away and starts the counter climbing from 0.
    pub fn new(table: PricingTable, config: TripConfiguration, counter: ValueInterpolator) -> Self {
        info!("Estimator started for {} ({} days)", config.destination, config.duration_days);
        let initial = compute(&config, &table);
        let (breakdown, _) = watch::channel(CostBreakdown::default());
        let mut estimator = Self {
            table,
            config,
            breakdown,
            counter,
            animation: None,
        };
        estimator.publish(initial);
        estimator
    }

    pub fn set_destination(&mut self, destination: String) {
        self.config.destination = destination;
        self.recompute();
    }

    /// Expects `days` already clamped by the slider.
    pub fn set_duration_days(&mut self, days: u8) {
        self.config.duration_days = days;
        self.recompute();
    }

    pub fn set_include_flights(&mut self, include: bool) {
        self.config.include_flights = include;
        self.recompute();
    }

    pub fn set_include_hotel(&mut self, include: bool) {
        self.config.include_hotel = include;
        self.recompute();
    }

    pub fn set_hotel_tier(&mut self, tier: u8) {
        self.config.hotel_tier = tier;
        self.recompute();
    }

    pub fn set_include_ground_transport(&mut self, include: bool) {
        self.config.include_ground_transport = include;
        self.recompute();
    }

    fn recompute(&mut self) {
        let breakdown = compute(&self.config, &self.table);
        debug!("Recomputed total: {}", breakdown.total);
        self.publish(breakdown);
    }

    /// Publishes every recompute, but only moves the counter when the total changed.
    fn publish(&mut self, breakdown: CostBreakdown) {
        let total = breakdown.total;
        let previous = self.breakdown.send_replace(breakdown).total;
        if total != previous || self.animation.is_none() {
            self.animation = Some(self.counter.retarget(total as f64));
        }
    }

    pub fn config(&self) -> &TripConfiguration {
        &self.config
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    pub fn breakdown(&self) -> CostBreakdown {
        self.breakdown.borrow().clone()
    }

    pub fn subscribe_breakdown(&self) -> watch::Receiver<CostBreakdown> {
        self.breakdown.subscribe()
    }

    pub fn displayed_value(&self) -> i64 {
        self.counter.displayed()
    }

    pub fn subscribe_display(&self) -> watch::Receiver<i64> {
        self.counter.subscribe()
    }

    pub fn is_animating(&self) -> bool {
        self.counter.phase() == AnimationPhase::Animating
    }

    /// Handle of the animation started by the latest change.
    pub fn animation(&self) -> Option<&AnimationHandle> {
        self.animation.as_ref()
    }

    /// Start of the counter's most recent transition.
    pub fn transition_started_at(&self) -> Option<tokio::time::Instant> {
        self.counter.transition().map(|transition| transition.started_at)
    }

    /// Snapshot handed to the booking step.
    pub fn summary(&self) -> ItinerarySummary {
        ItinerarySummary {
            quote_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            trip: self.config.clone(),
            breakdown: self.breakdown(),
        }
    }

    /// Stop the counter. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.counter.cancel();
    }
}

impl Drop for Estimator {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Priced trip passed on when the traveller chooses to book.
#[derive(Debug, Clone, Serialize)]
pub struct ItinerarySummary {
    pub quote_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub trip: TripConfiguration,
    pub breakdown: CostBreakdown,
}

impl ItinerarySummary {
    /// Plain-text rendering for the terminal.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Itinerary quote {}", self.quote_id),
            format!("Destination: {}", self.trip.destination),
            format!("Duration: {} days", self.trip.duration_days),
        ];
        for item in &self.breakdown.line_items {
            lines.push(format!("  {:<32} ${:>7}", item.label, item.amount));
        }
        lines.push(format!("  {:<32} ${:>7}", "Estimated total", self.breakdown.total));
        lines.join("\n")
    }
}
