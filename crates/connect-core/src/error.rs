//! Error types for Kafka Connect client operations.
//!
//! Errors cover the failures that happen around an HTTP exchange: building the
//! request, reaching the worker, and encoding or decoding JSON bodies. HTTP
//! error statuses returned by the worker are not errors at this level; they are
//! reported through [`StatusInfo`](crate::response::StatusInfo).

use thiserror::Error;

/// Main error type for Kafka Connect client operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Client configuration is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Request URL could not be constructed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request body could not be encoded as JSON
    #[error("Failed to encode request body: {0}")]
    EncodeError(String),

    /// The worker could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The transport gave up waiting for a response
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// HTTP request failed without producing a response
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Response body could not be read or decoded
    #[error("Failed to parse Connect response: {0}")]
    ParseError(String),

    /// The worker answered with an error status
    #[error("Connect API error {status_code}: {message}")]
    ApiError {
        /// HTTP status code returned by the worker
        status_code: u16,
        /// Server message, or the status line when the body carried none
        message: String,
    },
}

/// Specialized result type for Kafka Connect client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::EncodeError(_) => "ENCODE_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ApiError { .. } => "API_ERROR",
        }
    }

    /// Returns true if no HTTP response was obtained.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_) | Self::Timeout(_) | Self::HttpError(_)
        )
    }

    /// Returns true if the request never left the client.
    #[must_use]
    pub const fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_)
                | Self::ValidationError(_)
                | Self::InvalidEndpoint(_)
                | Self::EncodeError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_builder() {
            Self::InvalidEndpoint(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::ValidationError("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
        assert_eq!(
            Error::EncodeError("test".to_string()).error_code(),
            "ENCODE_ERROR"
        );
        assert_eq!(
            Error::ServiceUnavailable("test".to_string()).error_code(),
            "SERVICE_UNAVAILABLE"
        );
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::HttpError("test".to_string()).error_code(),
            "HTTP_ERROR"
        );
        assert_eq!(
            Error::ParseError("test".to_string()).error_code(),
            "PARSE_ERROR"
        );
        assert_eq!(
            Error::ApiError {
                status_code: 409,
                message: "rebalance in progress".to_string()
            }
            .error_code(),
            "API_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::ServiceUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Service unavailable: connection refused");

        let err = Error::ApiError {
            status_code: 404,
            message: "Connector foo not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Connect API error 404: Connector foo not found"
        );
    }

    #[test]
    fn test_classification() {
        assert!(Error::Timeout("t".to_string()).is_transport());
        assert!(Error::ServiceUnavailable("t".to_string()).is_transport());
        assert!(Error::HttpError("t".to_string()).is_transport());
        assert!(!Error::ParseError("t".to_string()).is_transport());

        assert!(Error::InvalidEndpoint("t".to_string()).is_construction());
        assert!(Error::EncodeError("t".to_string()).is_construction());
        assert!(!Error::HttpError("t".to_string()).is_construction());
        assert!(!Error::ParseError("t".to_string()).is_construction());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let connect_err: Error = err.into();
        assert!(matches!(connect_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_error_partial_eq() {
        let err1 = Error::ParseError("test".to_string());
        let err2 = err1.clone();
        let err3 = Error::ParseError("other".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
