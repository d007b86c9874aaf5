//! Service layer error types
//!
//! Errors that can occur in the application service layer, abstracting over
//! the transport errors raised by `RawApiPort` adapters.

use crate::ports::outbound::ApiError;

/// Errors that can occur in service operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Transport or HTTP status failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Response arrived but didn't match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request was rejected client-side before being sent
    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Api(e) if e.is_not_found())
    }
}

impl From<timetabler_domain::DomainError> for ServiceError {
    fn from(err: timetabler_domain::DomainError) -> Self {
        Self::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected_through_api_errors() {
        let err: ServiceError = ApiError::NotFound("/api/rooms/1".into()).into();
        assert!(err.is_not_found());
        assert!(!ServiceError::invalid("nope").is_not_found());
    }

    #[test]
    fn api_errors_display_transparently() {
        let err: ServiceError = ApiError::HttpError {
            status: 422,
            message: "periodId is required".into(),
        }
        .into();
        assert_eq!(err.to_string(), "HTTP 422: periodId is required");
    }
}
