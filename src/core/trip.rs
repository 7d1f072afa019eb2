//! # Trip Configuration
//!
//! The set of options the traveller picks. Only `Estimator` (state.rs) holds
//! one mutably; everything else reads it.

use serde::Serialize;

pub const MIN_DURATION_DAYS: u8 = 1;
pub const MAX_DURATION_DAYS: u8 = 30;

/// Star ratings the tier selector offers.
pub const HOTEL_TIERS: [u8; 3] = [3, 4, 5];

pub const DEFAULT_DESTINATION: &str = "Jaipur";
pub const DEFAULT_DURATION_DAYS: u8 = 7;
pub const DEFAULT_HOTEL_TIER: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripConfiguration {
    /// Cosmetic only, never priced.
    pub destination: String,
    /// `MIN_DURATION_DAYS..=MAX_DURATION_DAYS`, clamped by the input side.
    pub duration_days: u8,
    pub include_flights: bool,
    pub include_hotel: bool,
    /// Star rating. Kept as a raw number so an unknown tier can still be priced (as zero).
    pub hotel_tier: u8,
    pub include_ground_transport: bool,
}

impl Default for TripConfiguration {
    fn default() -> Self {
        Self {
            destination: DEFAULT_DESTINATION.to_string(),
            duration_days: DEFAULT_DURATION_DAYS,
            include_flights: true,
            include_hotel: true,
            hotel_tier: DEFAULT_HOTEL_TIER,
            include_ground_transport: false,
        }
    }
}

/// Clamp a requested duration into the slider's range.
pub fn clamp_duration_days(days: i64) -> u8 {
    days.clamp(MIN_DURATION_DAYS as i64, MAX_DURATION_DAYS as i64) as u8
}

/// Next tier in `HOTEL_TIERS` after `tier`, wrapping around. Unknown tiers restart at the lowest.
pub fn next_hotel_tier(tier: u8) -> u8 {
    match HOTEL_TIERS.iter().position(|&t| t == tier) {
        Some(i) => HOTEL_TIERS[(i + 1) % HOTEL_TIERS.len()],
        None => HOTEL_TIERS[0],
    }
}

/// Previous tier in `HOTEL_TIERS` before `tier`, wrapping around.
pub fn prev_hotel_tier(tier: u8) -> u8 {
    match HOTEL_TIERS.iter().position(|&t| t == tier) {
        Some(0) | None => HOTEL_TIERS[HOTEL_TIERS.len() - 1],
        Some(i) => HOTEL_TIERS[i - 1],
    }
}
