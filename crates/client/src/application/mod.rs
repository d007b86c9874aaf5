//! Application layer
//!
//! Ports, REST services and the preference editing core. Nothing here knows
//! which HTTP client or view sits on either side.

pub mod api;
pub mod dto;
pub mod editing;
pub mod error;
pub mod ports;
pub mod services;

pub use error::ServiceError;
