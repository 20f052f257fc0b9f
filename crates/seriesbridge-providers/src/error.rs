//! Error types for the external API clients.

use std::fmt;
use thiserror::Error;

/// The category of an API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// Authentication failed or credentials are invalid/expired.
    AuthenticationFailed,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// Rate limit exceeded - too many requests.
    RateLimited,
    /// Server returned an error (5xx status codes).
    ServerError,
    /// Invalid response from the server - parse error, unexpected format.
    InvalidResponse,
    /// Resource not found (404).
    NotFound,
    /// Request was invalid (400) - bad parameters, malformed payload.
    BadRequest,
    /// Configuration error - missing or invalid config.
    ConfigurationError,
}

impl ApiErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while talking to an external API.
#[derive(Debug, Error)]
pub struct ApiError {
    /// The error code categorizing this error.
    code: ApiErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The service that generated this error (e.g., "zoom", "wordpress").
    service: Option<String>,
}

impl ApiError {
    /// Creates a new API error with the given code and message.
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            service: None,
        }
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::AuthenticationFailed, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NetworkError, message)
    }

    /// Creates a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::RateLimited, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ServerError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidResponse, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::BadRequest, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ConfigurationError, message)
    }

    /// Sets the service name for this error.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ApiErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref service) = self.service {
            write!(f, "[{}] ", service)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_codes() {
        assert!(ApiErrorCode::NetworkError.is_retryable());
        assert!(ApiErrorCode::RateLimited.is_retryable());
        assert!(ApiErrorCode::ServerError.is_retryable());
        assert!(!ApiErrorCode::AuthenticationFailed.is_retryable());
        assert!(!ApiErrorCode::BadRequest.is_retryable());
    }

    #[test]
    fn display_with_service() {
        let err = ApiError::rate_limited("too many requests").with_service("zoom");
        let display = err.to_string();
        assert!(display.contains("[zoom]"));
        assert!(display.contains("rate_limited"));
        assert!(display.contains("too many requests"));
    }

    #[test]
    fn accessors() {
        let err = ApiError::authentication("token expired");
        assert_eq!(err.code(), ApiErrorCode::AuthenticationFailed);
        assert_eq!(err.message(), "token expired");
        assert!(!err.is_retryable());
    }
}
