//! Normalized outcome of a single HTTP exchange.
//!
//! Every call against the Connect REST API ends in an [`ApiResponse`], a three slot
//! record holding an optional payload, an optional [`StatusInfo`] and an optional
//! [`Error`]. Which slots are filled tells the caller what happened:
//!
//! | outcome | payload | status | error |
//! |---------|---------|--------|-------|
//! | 2xx with a decodable body | yes | yes | no |
//! | 2xx with an empty body | no | yes | no |
//! | status >= 400, or outside `[200, 300)` | no | yes | no |
//! | body could not be read or decoded | no | yes | yes |
//! | request never produced a response | no | no | yes |
//!
//! Callers should branch on `error` first, then on the status code, and only then
//! consume the payload.

use crate::error::{Error, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error record returned by Connect workers on failed requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerError {
    /// Numeric error code (usually mirrors the HTTP status).
    #[serde(default)]
    pub error_code: u16,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}

/// HTTP status of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    status_line: String,
    status_code: u16,
    server_message: Option<String>,
}

impl StatusInfo {
    /// Create a status from its parts. An empty server message is stored as absent.
    #[must_use]
    pub fn new(
        status_line: impl Into<String>,
        status_code: u16,
        server_message: Option<String>,
    ) -> Self {
        Self {
            status_line: status_line.into(),
            status_code,
            server_message: server_message.filter(|message| !message.is_empty()),
        }
    }

    /// Build a status from a response status code, e.g. `404 Not Found`.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status.to_string(), status.as_u16(), None)
    }

    /// Attach the message extracted from a server error body.
    #[must_use]
    pub fn with_server_message(self, message: Option<String>) -> Self {
        Self::new(self.status_line, self.status_code, message)
    }

    /// Canonical status line: the code and its registered reason phrase, not
    /// the phrase the server sent.
    #[must_use]
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Numeric HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Message from the server's JSON error body, when there was one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    /// True for codes in `[200, 300)`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }

    /// True for codes `>= 400`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.server_message {
            Some(message) => write!(f, "{}: {message}", self.status_line),
            None => f.write_str(&self.status_line),
        }
    }
}

/// Three slot outcome of a Connect API call.
#[derive(Debug)]
#[must_use]
pub struct ApiResponse<T> {
    /// Decoded response body.
    pub payload: Option<T>,
    /// Status of the exchange; absent only when no response was received.
    pub status: Option<StatusInfo>,
    /// Construction, transport or decoding failure.
    pub error: Option<Error>,
}

impl<T> ApiResponse<T> {
    /// Decoded payload with its status.
    pub fn success(payload: T, status: StatusInfo) -> Self {
        Self {
            payload: Some(payload),
            status: Some(status),
            error: None,
        }
    }

    /// Response without a usable body.
    pub fn status_only(status: StatusInfo) -> Self {
        Self {
            payload: None,
            status: Some(status),
            error: None,
        }
    }

    /// Response whose body could not be read or decoded.
    pub fn undecodable(status: StatusInfo, error: Error) -> Self {
        Self {
            payload: None,
            status: Some(status),
            error: Some(error),
        }
    }

    /// Request that never produced a response.
    pub fn failed(error: Error) -> Self {
        Self {
            payload: None,
            status: None,
            error: Some(error),
        }
    }

    /// True when there is no error and the status code is in `[200, 300)`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status.as_ref().is_some_and(StatusInfo::is_success)
    }

    /// Status code of the exchange, if a response was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status.as_ref().map(StatusInfo::status_code)
    }

    /// Transform the payload, keeping status and error untouched.
    pub fn map_payload<U, F>(self, map: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            payload: self.payload.map(map),
            status: self.status,
            error: self.error,
        }
    }

    /// Drop the payload for operations where only status and error matter.
    pub fn without_payload(self) -> ApiResponse<()> {
        ApiResponse {
            payload: None,
            status: self.status,
            error: self.error,
        }
    }

    /// Split into `(payload, status, error)`.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Option<StatusInfo>, Option<Error>) {
        (self.payload, self.status, self.error)
    }

    /// Collapse into a `Result` for callers that prefer `?`.
    ///
    /// Errors are returned as-is, statuses outside `[200, 300)` become
    /// [`Error::ApiError`], and the payload is `None` for empty bodies.
    ///
    /// # Errors
    ///
    /// Returns the recorded error, or [`Error::ApiError`] for unsuccessful statuses.
    pub fn into_result(self) -> Result<Option<T>> {
        if let Some(error) = self.error {
            return Err(error);
        }

        match self.status {
            Some(status) if !status.is_success() => Err(Error::ApiError {
                status_code: status.status_code(),
                message: status
                    .server_message()
                    .unwrap_or_else(|| status.status_line())
                    .to_string(),
            }),
            _ => Ok(self.payload),
        }
    }
}

/// Extract the message of a server error body, if it decodes and is non-empty.
pub(crate) fn server_message(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    serde_json::from_slice::<ServerError>(body)
        .ok()
        .map(|error| error.message)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_code() {
        let status = StatusInfo::from_status(StatusCode::NOT_FOUND);
        assert_eq!(status.status_line(), "404 Not Found");
        assert_eq!(status.status_code(), 404);
        assert!(status.server_message().is_none());
        assert!(status.is_error());
        assert!(!status.is_success());
    }

    #[test]
    fn status_line_uses_canonical_reason() {
        let status = StatusInfo::from_status(StatusCode::from_u16(503).unwrap());
        assert_eq!(status.status_line(), "503 Service Unavailable");

        let status = StatusInfo::from_status(StatusCode::from_u16(599).unwrap());
        assert_eq!(status.status_code(), 599);
        assert!(status.status_line().starts_with("599 "));
    }

    #[test]
    fn empty_server_message_is_absent() {
        let status = StatusInfo::new("409 Conflict", 409, Some(String::new()));
        assert!(status.server_message().is_none());

        let status = status.with_server_message(Some("rebalance in progress".into()));
        assert_eq!(status.server_message(), Some("rebalance in progress"));
        assert_eq!(status.to_string(), "409 Conflict: rebalance in progress");
    }

    #[test]
    fn success_band() {
        assert!(StatusInfo::from_status(StatusCode::OK).is_success());
        assert!(StatusInfo::from_status(StatusCode::NO_CONTENT).is_success());
        assert!(!StatusInfo::from_status(StatusCode::MOVED_PERMANENTLY).is_success());
        assert!(!StatusInfo::from_status(StatusCode::MOVED_PERMANENTLY).is_error());
    }

    #[test]
    fn server_message_extraction() {
        assert_eq!(
            server_message(br#"{"error_code":404,"message":"connector not found"}"#),
            Some("connector not found".to_string())
        );
        assert_eq!(server_message(br#"{"error_code":500,"message":""}"#), None);
        assert_eq!(server_message(b"<html>bad gateway</html>"), None);
        assert_eq!(server_message(b""), None);
    }

    #[test]
    fn into_result_prefers_error() {
        let response: ApiResponse<u32> = ApiResponse::undecodable(
            StatusInfo::from_status(StatusCode::OK),
            Error::ParseError("expected u32".into()),
        );
        assert!(matches!(response.into_result(), Err(Error::ParseError(_))));
    }

    #[test]
    fn into_result_maps_http_errors() {
        let status = StatusInfo::from_status(StatusCode::NOT_FOUND)
            .with_server_message(Some("Connector foo not found".into()));
        let response: ApiResponse<u32> = ApiResponse::status_only(status);
        assert_eq!(
            response.into_result(),
            Err(Error::ApiError {
                status_code: 404,
                message: "Connector foo not found".into()
            })
        );

        let response: ApiResponse<u32> =
            ApiResponse::status_only(StatusInfo::from_status(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(
            response.into_result(),
            Err(Error::ApiError {
                status_code: 503,
                message: "503 Service Unavailable".into()
            })
        );
    }

    #[test]
    fn into_result_passes_payloads() {
        let response = ApiResponse::success(7u32, StatusInfo::from_status(StatusCode::OK));
        assert!(response.is_success());
        assert_eq!(response.into_result(), Ok(Some(7)));

        let response: ApiResponse<u32> =
            ApiResponse::status_only(StatusInfo::from_status(StatusCode::ACCEPTED));
        assert!(response.is_success());
        assert_eq!(response.into_result(), Ok(None));
    }

    #[test]
    fn without_payload_keeps_status() {
        let response = ApiResponse::success("body", StatusInfo::from_status(StatusCode::OK))
            .without_payload();
        let (payload, status, error) = response.into_parts();
        assert!(payload.is_none());
        assert_eq!(status.map(|s| s.status_code()), Some(200));
        assert!(error.is_none());
    }

    #[test]
    fn failed_has_no_status() {
        let response: ApiResponse<()> =
            ApiResponse::failed(Error::ServiceUnavailable("connection refused".into()));
        assert!(!response.is_success());
        assert!(response.status_code().is_none());
    }
}
