//! Transport option entity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::estimator::format_travel_time;
use crate::value_objects::TransportMode;

/// An estimated way to travel one itinerary leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportOption {
    /// Mode of transport
    pub mode: TransportMode,
    /// Estimated door-to-door travel time, rounded to whole minutes
    pub travel_time_minutes: u32,
    /// Estimated price, rounded to whole euros
    pub price_eur: u32,
}

impl TransportOption {
    /// Create a new transport option
    #[must_use]
    pub const fn new(mode: TransportMode, travel_time_minutes: u32, price_eur: u32) -> Self {
        Self {
            mode,
            travel_time_minutes,
            price_eur,
        }
    }

    /// Icon class for rendering; decorative only
    #[must_use]
    pub const fn icon_hint(&self) -> &'static str {
        self.mode.icon_hint()
    }

    /// Travel time as `"N min"` or `"Hh Mmin"`
    #[must_use]
    pub fn format_time(&self) -> String {
        format_travel_time(self.travel_time_minutes)
    }

    /// Price as `"N€"`
    #[must_use]
    pub fn format_price(&self) -> String {
        format!("{}€", self.price_eur)
    }
}

impl fmt::Display for TransportOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} · {} · {}",
            self.mode,
            self.format_time(),
            self.format_price()
        )
    }
}
