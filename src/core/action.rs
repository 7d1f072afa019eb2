//! # Actions
//!
//! Everything the traveller can do to the estimate becomes an `Action`.
//! Toggling flights? That's `Action::SetIncludeFlights(false)`.
//!
//! `update()` applies one action to the `Estimator` and tells the caller
//! what, if anything, must happen outside the core.
//!
//! ```text
//! Estimator + Action  →  update()  →  Effect
//! ```

use log::{debug, info};

use crate::core::state::{Estimator, ItinerarySummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetDestination(String),
    SetDurationDays(u8),
    SetIncludeFlights(bool),
    SetIncludeHotel(bool),
    SetHotelTier(u8),
    SetIncludeGroundTransport(bool),
    /// Leave the estimator for the booking step.
    Book,
    Quit,
}

/// Work for the host loop after an action is applied.
#[derive(Debug)]
pub enum Effect {
    None,
    Quit,
    Book(ItinerarySummary),
}

pub fn update(estimator: &mut Estimator, action: Action) -> Effect {
    debug!("Applying {:?}", action);
    match action {
        Action::SetDestination(destination) => estimator.set_destination(destination),
        Action::SetDurationDays(days) => estimator.set_duration_days(days),
        Action::SetIncludeFlights(include) => estimator.set_include_flights(include),
        Action::SetIncludeHotel(include) => estimator.set_include_hotel(include),
        Action::SetHotelTier(tier) => estimator.set_hotel_tier(tier),
        Action::SetIncludeGroundTransport(include) => {
            estimator.set_include_ground_transport(include)
        }
        Action::Book => {
            let summary = estimator.summary();
            info!(
                "Booking quote {} for {} at {}",
                summary.quote_id, summary.trip.destination, summary.breakdown.total
            );
            return Effect::Book(summary);
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}
