//! Application services
//!
//! REST-backed implementations of the application ports. Services depend on
//! `RawApiPort`, never on a concrete HTTP client.

pub mod period_service;
pub mod preference_service;

pub use period_service::PeriodService;
pub use preference_service::{collection_path, PreferenceService};
