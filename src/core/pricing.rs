//! # Pricing Rules
//!
//! Turns a `TripConfiguration` into an itemized `CostBreakdown`.
//!
//! ```text
//! base      = base_daily_rate × days                 (always)
//! flights   = flight_flat_fee                        (if include_flights)
//! hotel     = hotel_daily_rate_by_tier[tier] × days  (if include_hotel, 0 for unknown tier)
//! transport = ground_transport_daily_rate × days     (if include_ground_transport)
//! total     = sum of the above
//! ```
//!
//! `compute()` is pure: same input, same output, no caching between calls.
//! Rates can come from a user's config file, so every product and the sum
//! saturate at `u64::MAX` instead of overflowing.

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::core::trip::TripConfiguration;

pub const DEFAULT_BASE_DAILY_RATE: u64 = 50;
pub const DEFAULT_FLIGHT_FLAT_FEE: u64 = 400;
pub const DEFAULT_GROUND_TRANSPORT_DAILY_RATE: u64 = 40;
pub const DEFAULT_HOTEL_DAILY_RATES: [(u8, u64); 3] = [(3, 80), (4, 150), (5, 250)];

/// Rate constants. Built once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    pub base_daily_rate: u64,
    pub flight_flat_fee: u64,
    pub hotel_daily_rate_by_tier: BTreeMap<u8, u64>,
    pub ground_transport_daily_rate: u64,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            base_daily_rate: DEFAULT_BASE_DAILY_RATE,
            flight_flat_fee: DEFAULT_FLIGHT_FLAT_FEE,
            hotel_daily_rate_by_tier: DEFAULT_HOTEL_DAILY_RATES.into_iter().collect(),
            ground_transport_daily_rate: DEFAULT_GROUND_TRANSPORT_DAILY_RATE,
        }
    }
}

impl PricingTable {
    pub fn hotel_rate(&self, tier: u8) -> Option<u64> {
        self.hotel_daily_rate_by_tier.get(&tier).copied()
    }
}

/// Which pricing rule produced a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    Base,
    Flights,
    Hotel,
    GroundTransport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub kind: CostKind,
    pub label: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CostBreakdown {
    pub line_items: Vec<LineItem>,
    pub total: u64,
}

impl CostBreakdown {
    fn from_items(line_items: Vec<LineItem>) -> Self {
        let total = line_items
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.amount));
        Self { line_items, total }
    }

    /// Amount of the given component, or `None` if it is not enabled.
    pub fn amount_of(&self, kind: CostKind) -> Option<u64> {
        self.line_items
            .iter()
            .find(|item| item.kind == kind)
            .map(|item| item.amount)
    }
}

/// Price a trip. Never fails; `duration_days` is assumed already clamped.
pub fn compute(config: &TripConfiguration, table: &PricingTable) -> CostBreakdown {
    let days = u64::from(config.duration_days);
    let mut items = Vec::with_capacity(4);

    items.push(LineItem {
        kind: CostKind::Base,
        label: format!("Daily expenses ({days} days)"),
        amount: table.base_daily_rate.saturating_mul(days),
    });

    if config.include_flights {
        items.push(LineItem {
            kind: CostKind::Flights,
            label: "Round-trip flights".to_string(),
            amount: table.flight_flat_fee,
        });
    }

    if config.include_hotel {
        let rate = table.hotel_rate(config.hotel_tier).unwrap_or_else(|| {
            // Priced as zero rather than rejected; likely under-prices the trip.
            warn!(
                "No hotel rate for {}-star tier, pricing hotel at 0",
                config.hotel_tier
            );
            0
        });
        items.push(LineItem {
            kind: CostKind::Hotel,
            label: format!("{}-star hotel ({days} nights)", config.hotel_tier),
            amount: rate.saturating_mul(days),
        });
    }

    if config.include_ground_transport {
        items.push(LineItem {
            kind: CostKind::GroundTransport,
            label: format!("Private cab ({days} days)"),
            amount: table.ground_transport_daily_rate.saturating_mul(days),
        });
    }

    CostBreakdown::from_items(items)
}
