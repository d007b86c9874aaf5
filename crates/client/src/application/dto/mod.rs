//! Wire DTOs for the timetable backend.
//!
//! These mirror the backend's camelCase JSON. Conversion into domain types
//! happens here so that services hand out decoded values only.

mod preference;

pub use preference::{PreferenceRecordDto, PreferenceWriteBody};
