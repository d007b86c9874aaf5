//! Raw API Port - Object-safe HTTP boundary
//!
//! Typed request/response handling needs generic methods, which are not
//! object-safe. Adapters implement this JSON-in/JSON-out trait instead so the
//! composition root can hold them behind `Arc<dyn RawApiPort>`; the application
//! layer's `Api` wrapper adds the serde conversions on top.

use async_trait::async_trait;
use serde_json::Value;

use super::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
