//! Domain layer for Tourguide
//!
//! Contains the geographic value objects, itinerary entities and the
//! distance/transport estimator used when no live transport data is available.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod estimator;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use estimator::{compute_distance_km, format_travel_time, generate_transport_options};
pub use value_objects::*;
