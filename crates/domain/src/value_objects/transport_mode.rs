//! Transport mode value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transport modes the fallback estimator can propose
///
/// Declaration order is the order options are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// On foot
    Walking,
    /// Bus, metro or tram
    PublicTransit,
    /// Taxi or ride hailing
    Taxi,
}

impl TransportMode {
    /// All modes in presentation order
    pub const ALL: [Self; 3] = [Self::Walking, Self::PublicTransit, Self::Taxi];

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Walking => "Walking",
            Self::PublicTransit => "Public transit",
            Self::Taxi => "Taxi",
        }
    }

    /// Icon class used by the itinerary page
    #[must_use]
    pub const fn icon_hint(&self) -> &'static str {
        match self {
            Self::Walking => "fas fa-walking",
            Self::PublicTransit => "fas fa-bus",
            Self::Taxi => "fas fa-taxi",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TransportMode::Walking.to_string(), "Walking");
        assert_eq!(TransportMode::PublicTransit.to_string(), "Public transit");
        assert_eq!(TransportMode::Taxi.to_string(), "Taxi");
    }

    #[test]
    fn test_icon_hints() {
        assert_eq!(TransportMode::Walking.icon_hint(), "fas fa-walking");
        assert_eq!(TransportMode::PublicTransit.icon_hint(), "fas fa-bus");
        assert_eq!(TransportMode::Taxi.icon_hint(), "fas fa-taxi");
    }

    #[test]
    fn test_ordering_matches_presentation_order() {
        let mut modes = vec![TransportMode::Taxi, TransportMode::Walking, TransportMode::PublicTransit];
        modes.sort();
        assert_eq!(modes, TransportMode::ALL.to_vec());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TransportMode::PublicTransit).unwrap();
        assert_eq!(json, "\"public_transit\"");
        let back: TransportMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TransportMode::PublicTransit);
    }
}
