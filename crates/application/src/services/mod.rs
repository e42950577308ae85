//! Application services - Use case implementations

mod itinerary_service;
mod transport_service;

pub use itinerary_service::{ItineraryPlan, ItineraryService};
pub use transport_service::{
    DEFAULT_LOOKUP_TIMEOUT_SECS, FallbackReason, TransportOutcome, TransportResult,
    TransportService,
};
