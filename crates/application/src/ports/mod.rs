//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod transport_lookup_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use transport_lookup_port::MockTransportLookupPort;
pub use transport_lookup_port::{TransportLookupPort, TransportRequest, TransportResponse};
