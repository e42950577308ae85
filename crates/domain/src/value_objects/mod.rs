//! Value objects - Immutable domain primitives

mod geo_point;
mod transport_mode;

pub use geo_point::GeoPoint;
pub use transport_mode::TransportMode;
