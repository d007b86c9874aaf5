//! Transport errors shared by every HTTP-facing port.

/// Errors raised at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Validation rejections (4xx other than 404) are not worth retrying.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::HttpError { status, .. } if (400..500).contains(status))
    }
}
