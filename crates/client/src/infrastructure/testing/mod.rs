//! Test-only infrastructure fakes.
//!
//! Concrete implementations of the application ports for unit and
//! integration tests, so the editing session can run without a backend.

pub mod fixtures;
pub mod in_memory_backend;

pub use in_memory_backend::{BackendCall, InMemoryBackend};
