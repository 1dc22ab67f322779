//! Shared error type across pageviews crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Missing or malformed `path`.
    InvalidArgument,
    /// Stored key holds something other than a counter.
    TypeConflict,
    /// Request body could not be parsed.
    MalformedRequest,
    /// Request body over the size limit.
    PayloadTooLarge,
    /// Key-value store failed or timed out.
    StoreUnavailable,
    /// Startup configuration rejected.
    Config,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidArgument => "INVALID_ARGUMENT",
            ClientCode::TypeConflict => "TYPE_CONFLICT",
            ClientCode::MalformedRequest => "MALFORMED_REQUEST",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::Config => "CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PageViewsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PageViewsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("type conflict: {0}")]
    TypeConflict(String),
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("config: {0}")]
    Config(String),
}

impl PageViewsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PageViewsError::InvalidArgument(_) => ClientCode::InvalidArgument,
            PageViewsError::TypeConflict(_) => ClientCode::TypeConflict,
            PageViewsError::MalformedRequest(_) => ClientCode::MalformedRequest,
            PageViewsError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            PageViewsError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            PageViewsError::Config(_) => ClientCode::Config,
        }
    }

    /// Message that is safe to show to a client.
    ///
    /// Store failures never echo the backend message.
    pub fn public_message(&self) -> String {
        match self {
            PageViewsError::InvalidArgument(m) => m.clone(),
            PageViewsError::TypeConflict(_) => "Key type mismatch".to_string(),
            PageViewsError::MalformedRequest(_) => "Invalid JSON".to_string(),
            PageViewsError::PayloadTooLarge => "Payload Too Large".to_string(),
            PageViewsError::StoreUnavailable(_) | PageViewsError::Config(_) => {
                "Internal Server Error".to_string()
            }
        }
    }

    /// True for errors caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PageViewsError::InvalidArgument(_)
                | PageViewsError::TypeConflict(_)
                | PageViewsError::MalformedRequest(_)
                | PageViewsError::PayloadTooLarge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failure_hides_backend_detail() {
        let e = PageViewsError::StoreUnavailable("connection refused (os error 111)".into());
        assert_eq!(e.public_message(), "Internal Server Error");
        assert_eq!(e.client_code().as_str(), "STORE_UNAVAILABLE");
        assert!(!e.is_client_error());
    }

    #[test]
    fn invalid_argument_keeps_its_message() {
        let e = PageViewsError::InvalidArgument("Path parameter is required".into());
        assert_eq!(e.public_message(), "Path parameter is required");
        assert!(e.is_client_error());
    }
}
