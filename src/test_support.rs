//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::interpolator::ValueInterpolator;
use crate::core::pricing::PricingTable;
use crate::core::state::Estimator;
use crate::core::trip::TripConfiguration;

/// An estimator on the standard rates and the default trip (7 days, flights, 3-star hotel).
pub fn test_estimator() -> Estimator {
    Estimator::new(
        PricingTable::default(),
        TripConfiguration::default(),
        ValueInterpolator::default(),
    )
}

pub fn scenario_trip(days: u8, flights: bool, hotel: bool, tier: u8, cab: bool) -> TripConfiguration {
    TripConfiguration {
        destination: "Test".to_string(),
        duration_days: days,
        include_flights: flights,
        include_hotel: hotel,
        hotel_tier: tier,
        include_ground_transport: cab,
    }
}
