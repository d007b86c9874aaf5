//! Timetabler client crate.
//!
//! Preference editing session, REST adapters for the timetable backend and a
//! console front end.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use application::editing::{Brush, EditingSession, LoadState, SessionError};
pub use config::ClientConfig;
