//! Domain entities

mod period;
mod resource;
mod stored_preference;

pub use period::{sort_periods, Period};
pub use resource::{ResourceKind, ResourceRef};
pub use stored_preference::StoredPreference;
