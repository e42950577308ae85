//! Distance and transport estimation
//!
//! Local fallback used when the live transport lookup does not answer.
//! Every function here is pure and may be called concurrently for
//! different itinerary legs.
//!
//! Fixed speed assumptions: walking 5 km/h (12 min/km), public transit
//! 15 km/h (4 min/km), taxi 30 km/h (2 min/km).
//!
//! Rounding: half away from zero (`f64::round`). Inputs are clamped to be
//! non-negative first, so this is the same as rounding half up.

use crate::entities::TransportOption;
use crate::value_objects::{GeoPoint, TransportMode};

const WALKING_MINUTES_PER_KM: f64 = 12.0;

const TRANSIT_MIN_DISTANCE_KM: f64 = 0.5;
const TRANSIT_MINUTES_PER_KM: f64 = 4.0;
const TRANSIT_BASE_FARE_EUR: f64 = 1.5;
const TRANSIT_FARE_PER_KM_EUR: f64 = 0.2;

const TAXI_MIN_DISTANCE_KM: f64 = 0.3;
const TAXI_MINUTES_PER_KM: f64 = 2.0;
const TAXI_BASE_FARE_EUR: f64 = 5.0;
const TAXI_FARE_PER_KM_EUR: f64 = 1.5;

/// Great-circle distance between two points in kilometers (haversine, R = 6371 km)
#[must_use]
pub fn compute_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    a.distance_km(&b)
}

/// Estimate transport options for a leg of `distance_km` kilometers
///
/// Always returns walking first, then public transit when the leg is longer
/// than 0.5 km, then taxi when it is longer than 0.3 km. Negative or NaN
/// distances are treated as 0 km.
#[must_use]
#[allow(clippy::suboptimal_flops)] // Unfused arithmetic keeps fares identical to the published heuristic
pub fn generate_transport_options(distance_km: f64) -> Vec<TransportOption> {
    // f64::max returns the other operand for NaN
    let distance = distance_km.max(0.0);
    let mut options = Vec::with_capacity(TransportMode::ALL.len());

    options.push(TransportOption::new(
        TransportMode::Walking,
        round_units(distance * WALKING_MINUTES_PER_KM),
        0,
    ));

    if distance > TRANSIT_MIN_DISTANCE_KM {
        options.push(TransportOption::new(
            TransportMode::PublicTransit,
            round_units(distance * TRANSIT_MINUTES_PER_KM),
            round_units(TRANSIT_BASE_FARE_EUR + distance * TRANSIT_FARE_PER_KM_EUR),
        ));
    }

    if distance > TAXI_MIN_DISTANCE_KM {
        options.push(TransportOption::new(
            TransportMode::Taxi,
            round_units(distance * TAXI_MINUTES_PER_KM),
            round_units(TAXI_BASE_FARE_EUR + distance * TAXI_FARE_PER_KM_EUR),
        ));
    }

    options
}

/// Format minutes as `"N min"` below one hour, `"Hh Mmin"` otherwise
#[must_use]
pub fn format_travel_time(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{}h {}min", minutes / 60, minutes % 60)
    }
}

/// Round a non-negative estimate to whole units, saturating at `u32::MAX`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // `as` saturates and maps NaN to 0
fn round_units(value: f64) -> u32 {
    value.round() as u32
}
