//! Error types for portal.
//!
//! One error type covers every failure a catalog fetch can produce, with
//! explicit variants for transport, protocol, malformed-response and input
//! validation failures. Callers that only care about "did the fetch work"
//! treat every variant the same way.

use std::fmt;
use thiserror::Error;

/// The unified error type for catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success HTTP status from the catalog API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] MalformedResponseError),

    /// Input validation errors (bad base URL or cursor).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this is a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Protocol(e) if e.is_not_found())
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The HTTP client could not be built.
    #[error("client setup failed: {message}")]
    Setup { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Protocol-level errors from non-success responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error text from the response body (if present).
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// The body of a successful response could not be decoded.
#[derive(Debug, Error)]
#[error("{context}: {message}")]
pub struct MalformedResponseError {
    /// What was being decoded.
    pub context: String,
    /// Decoder message.
    pub message: String,
}

impl MalformedResponseError {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid page cursor.
    #[error("invalid page cursor '{value}': {reason}")]
    PageCursor { value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::new(404, Some("There is nothing here".to_string()));
        assert_eq!(err.to_string(), "HTTP 404: There is nothing here");

        let err = ProtocolError::new(502, None);
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_classification() {
        let err: Error = ProtocolError::new(404, None).into();
        assert!(err.is_not_found());

        let err: Error = ProtocolError::new(400, None).into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn malformed_response_display() {
        let err: Error = MalformedResponseError::new("page envelope", "missing field `info`").into();
        assert_eq!(
            err.to_string(),
            "malformed response: page envelope: missing field `info`"
        );
    }

    #[test]
    fn invalid_input_display() {
        let err: Error = InvalidInputError::ApiUrl {
            value: "ftp://x".to_string(),
            reason: "bad scheme".to_string(),
        }
        .into();
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "invalid input: invalid API URL 'ftp://x': bad scheme");
    }
}
