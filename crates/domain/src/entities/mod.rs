//! Domain entities

mod itinerary;
mod transport_option;

pub use itinerary::{Itinerary, ItineraryLeg, ItinerarySummary, Stop, WalkingDuration};
pub use transport_option::TransportOption;
