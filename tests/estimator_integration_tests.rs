use std::time::Duration;

use wayfare::core::action::{Action, Effect, update};
use wayfare::core::config::{CliOverrides, WayfareConfig, resolve};
use wayfare::core::interpolator::ValueInterpolator;
use wayfare::core::pricing::{CostKind, PricingTable, compute};
use wayfare::core::state::Estimator;
use wayfare::core::trip::TripConfiguration;

// ============================================================================
// Helper Functions
// ============================================================================

fn trip(days: u8, flights: bool, hotel: bool, tier: u8, cab: bool) -> TripConfiguration {
    TripConfiguration {
        destination: "Udaipur".to_string(),
        duration_days: days,
        include_flights: flights,
        include_hotel: hotel,
        hotel_tier: tier,
        include_ground_transport: cab,
    }
}

fn estimator_for(config: TripConfiguration) -> Estimator {
    Estimator::new(PricingTable::default(), config, ValueInterpolator::default())
}

// ============================================================================
// Pricing Scenarios
// ============================================================================

#[test]
fn test_reference_scenarios() {
    let table = PricingTable::default();
    assert_eq!(compute(&trip(7, true, true, 3, false), &table).total, 1310);
    assert_eq!(compute(&trip(1, false, false, 3, false), &table).total, 50);
    assert_eq!(compute(&trip(30, true, true, 5, true), &table).total, 10600);
    assert_eq!(compute(&trip(10, false, true, 9, false), &table).total, 500);
}

#[test]
fn test_config_file_rates_flow_into_estimate() {
    let config: WayfareConfig = toml::from_str(
        r#"
[trip]
duration_days = 2
include_flights = false

[pricing]
base_daily_rate = 100

[pricing.hotel_daily_rates]
"3" = 90
"#,
    )
    .unwrap();
    let resolved = resolve(&config, &CliOverrides::default());
    let estimator = Estimator::new(
        resolved.table,
        resolved.trip,
        ValueInterpolator::new(resolved.animation_duration, resolved.frame_rate),
    );
    assert_eq!(estimator.breakdown().total, 200 + 180);
}

#[test]
fn test_extreme_config_rates_still_price() {
    let config: WayfareConfig = toml::from_str(
        r#"
[pricing]
base_daily_rate = 9223372036854775807
"#,
    )
    .unwrap();
    let resolved = resolve(&config, &CliOverrides::default());
    assert_eq!(resolved.table.base_daily_rate, i64::MAX as u64);

    let breakdown = compute(&resolved.trip, &resolved.table);
    assert_eq!(breakdown.total, u64::MAX);

    let mut estimator = Estimator::new(resolved.table, resolved.trip, ValueInterpolator::default());
    estimator.set_duration_days(30);
    assert_eq!(estimator.breakdown().total, u64::MAX);
}

// ============================================================================
// State Holder
// ============================================================================

#[test]
fn test_breakdown_never_stale_after_mutation() {
    let mut estimator = estimator_for(TripConfiguration::default());
    let rx = estimator.subscribe_breakdown();

    let actions = [
        Action::SetDurationDays(30),
        Action::SetHotelTier(5),
        Action::SetIncludeGroundTransport(true),
        Action::SetIncludeFlights(false),
        Action::SetDestination("Munnar".to_string()),
        Action::SetIncludeHotel(false),
    ];
    for action in actions {
        update(&mut estimator, action);
        let expected = compute(estimator.config(), &PricingTable::default());
        assert_eq!(*rx.borrow(), expected);
        assert_eq!(estimator.breakdown(), expected);
    }
    assert_eq!(estimator.breakdown().amount_of(CostKind::Hotel), None);
}

#[test]
fn test_booking_summary_reflects_latest_trip() {
    let mut estimator = estimator_for(TripConfiguration::default());
    update(&mut estimator, Action::SetDurationDays(3));
    let Effect::Book(summary) = update(&mut estimator, Action::Book) else {
        panic!("expected a booking hand-off");
    };
    assert_eq!(summary.trip.duration_days, 3);
    assert_eq!(summary.breakdown.total, 150 + 400 + 240);
}

// ============================================================================
// Animated Total
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_total_animates_to_exact_value() {
    let estimator = estimator_for(trip(30, true, true, 5, true));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(estimator.displayed_value(), 10600);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_changes_keep_display_continuous() {
    let mut estimator = estimator_for(trip(1, false, false, 3, false));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(estimator.displayed_value(), 50);

    let mut display = estimator.subscribe_display();
    let mut previous = estimator.displayed_value();

    // Slider dragged upward faster than the animation can finish
    for days in 2..=20u8 {
        estimator.set_duration_days(days);
        tokio::time::sleep(Duration::from_millis(50)).await;
        if display.has_changed().unwrap() {
            let shown = *display.borrow_and_update();
            assert!(shown >= previous, "went backwards: {previous} -> {shown}");
            assert!(shown - previous < 100, "jumped: {previous} -> {shown}");
            previous = shown;
        }
    }

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(estimator.displayed_value(), 1000);
}

#[tokio::test(start_paused = true)]
async fn test_typing_a_destination_keeps_counter_idle() {
    let mut estimator = estimator_for(TripConfiguration::default());
    tokio::time::sleep(Duration::from_secs(1)).await;
    let mut display = estimator.subscribe_display();

    for typed in ["G", "Go", "Goa"] {
        update(&mut estimator, Action::SetDestination(typed.to_string()));
        assert!(!estimator.is_animating(), "animating after typing {typed:?}");
    }
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!display.has_changed().unwrap());
    assert_eq!(estimator.displayed_value(), 1310);

    update(&mut estimator, Action::SetDurationDays(8));
    assert!(estimator.is_animating());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_stops_counter_mid_flight() {
    let mut estimator = estimator_for(TripConfiguration::default());
    let display = estimator.subscribe_display();
    tokio::time::sleep(Duration::from_millis(100)).await;

    estimator.teardown();
    let frozen = *display.borrow();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(*display.borrow(), frozen);
    assert!(frozen < 1310);
    assert!(!estimator.is_animating());
}
