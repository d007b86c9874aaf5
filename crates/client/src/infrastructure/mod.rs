//! Infrastructure layer - External adapters

pub mod http_client;

// Test-only infrastructure fakes (ports/adapters).
// Available for integration testing from other crates as well
pub mod testing;

pub use http_client::HttpApiClient;
