//! Itinerary entities
//!
//! An itinerary is an ordered list of stops. Each pair of consecutive stops
//! forms a leg; legs are numbered from 1 (`step_id`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// Average walking speed used for the itinerary duration
const WALKING_SPEED_KMH: f64 = 5.0;

/// A place visited by the itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Display name of the site
    pub name: String,
    /// Category (museum, monument, park, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Postal address used for live transport lookups
    #[serde(default)]
    pub address: String,
    /// Coordinates, if already known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

impl Stop {
    /// Create a stop without coordinates
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            address: address.into(),
            coordinates: None,
        }
    }

    /// Set the coordinates
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: GeoPoint) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Text identifying the stop to a transport service
    ///
    /// The address when present, otherwise the name.
    #[must_use]
    pub fn location_label(&self) -> &str {
        let address = self.address.trim();
        if address.is_empty() {
            self.name.trim()
        } else {
            address
        }
    }
}

/// Travel between two consecutive stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryLeg {
    /// 1-based leg number
    pub step_id: u32,
    /// Departure stop
    pub origin: Stop,
    /// Arrival stop
    pub destination: Stop,
}

impl ItineraryLeg {
    /// Great-circle length of the leg, if both endpoints have coordinates
    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        match (self.origin.coordinates, self.destination.coordinates) {
            (Some(from), Some(to)) => Some(from.distance_km(&to)),
            _ => None,
        }
    }
}

/// Walking time for a distance, split into whole hours and minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalkingDuration {
    /// Whole hours
    pub hours: u32,
    /// Remaining whole minutes (0-59)
    pub minutes: u32,
}

impl WalkingDuration {
    /// Duration to walk `distance_km` at 5 km/h, truncated to whole minutes
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Truncation intended; saturates
    pub fn from_distance_km(distance_km: f64) -> Self {
        let total_hours = distance_km.max(0.0) / WALKING_SPEED_KMH;
        let hours = total_hours.trunc();
        let minutes = ((total_hours - hours) * 60.0).trunc();
        Self {
            hours: hours as u32,
            minutes: minutes as u32,
        }
    }
}

impl fmt::Display for WalkingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours == 0 {
            write!(f, "{}min", self.minutes)
        } else {
            write!(f, "{}h {}min", self.hours, self.minutes)
        }
    }
}

/// Aggregate figures for a whole itinerary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySummary {
    /// Number of legs
    pub leg_count: usize,
    /// Legs whose endpoints both have coordinates
    pub measured_legs: usize,
    /// Sum of the measured leg distances
    pub total_distance_km: f64,
    /// Time to walk the total distance
    pub walking: WalkingDuration,
}

/// An ordered tour of stops
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// City the tour takes place in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Stops in visiting order
    pub stops: Vec<Stop>,
}

impl Itinerary {
    /// Create an itinerary from stops in visiting order
    #[must_use]
    pub const fn new(stops: Vec<Stop>) -> Self {
        Self { city: None, stops }
    }

    /// Set the city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Number of legs (one less than the number of stops)
    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// All legs in order, numbered from 1
    #[must_use]
    pub fn legs(&self) -> Vec<ItineraryLeg> {
        self.stops
            .windows(2)
            .zip(1_u32..)
            .map(|(pair, step_id)| ItineraryLeg {
                step_id,
                origin: pair[0].clone(),
                destination: pair[1].clone(),
            })
            .collect()
    }

    /// The leg with the given 1-based step id
    #[must_use]
    pub fn leg(&self, step_id: u32) -> Option<ItineraryLeg> {
        let index = usize::try_from(step_id).ok()?.checked_sub(1)?;
        let origin = self.stops.get(index)?;
        let destination = self.stops.get(index + 1)?;
        Some(ItineraryLeg {
            step_id,
            origin: origin.clone(),
            destination: destination.clone(),
        })
    }

    /// Total distance and walking time over the legs that can be measured
    #[must_use]
    pub fn summary(&self) -> ItinerarySummary {
        let distances: Vec<f64> = self
            .legs()
            .iter()
            .filter_map(ItineraryLeg::distance_km)
            .collect();
        let total_distance_km: f64 = distances.iter().sum();

        ItinerarySummary {
            leg_count: self.leg_count(),
            measured_legs: distances.len(),
            total_distance_km,
            walking: WalkingDuration::from_distance_km(total_distance_km),
        }
    }
}
