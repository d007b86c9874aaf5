//! Transport-level port definitions.

pub mod outbound;
