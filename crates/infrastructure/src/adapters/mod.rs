//! Adapters implementing application ports

mod circuit_breaker;
mod geocoding_adapter;
mod transport_lookup_adapter;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};
pub use geocoding_adapter::GeocodingAdapter;
pub use transport_lookup_adapter::TransportLookupAdapter;
