//! Application-level ports
//!
//! Typed, domain-shaped contracts the editing core depends on. The REST
//! services and the in-memory backend both implement them.

mod period_port;
mod preference_port;

pub use period_port::PeriodPort;
pub use preference_port::{PreferencePort, PreferenceScope, PreferenceWrite};

#[cfg(test)]
pub use period_port::MockPeriodPort;
#[cfg(test)]
pub use preference_port::MockPreferencePort;
