//! Application layer - Use cases and orchestration
//!
//! Asks the live transport service for options on every itinerary leg and
//! falls back to the domain estimator when it does not answer in time.
//! Infrastructure adapters implement the ports defined here.

pub mod error;
pub mod option_parser;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use option_parser::{LiveOption, LiveOptionKind};
pub use ports::*;
pub use services::*;
