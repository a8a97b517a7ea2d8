//! Gateway Error Types
//!
//! The flat failure taxonomy of the backend gateway. Client errors and server
//! errors share a single `Http` variant; only 401 is singled out.

use thiserror::Error;

use crate::session::SessionError;

/// Message returned when the backend rejects the session
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Message used when an error body carries nothing usable
pub const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

/// Errors that can occur at the transport level
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Errors returned by gateway calls
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The backend answered 401; the session has been dropped
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// Any other non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never got a response
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// A response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request could not be built locally
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<SessionError> for GatewayError {
    fn from(err: SessionError) -> Self {
        GatewayError::InvalidRequest(format!("session unavailable: {}", err))
    }
}

/// Discriminant of [`GatewayError`] for callers that branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SessionExpired,
    Http,
    Network,
    Parse,
    InvalidRequest,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::SessionExpired => ErrorKind::SessionExpired,
            GatewayError::Http { .. } => ErrorKind::Http,
            GatewayError::Network(_) => ErrorKind::Network,
            GatewayError::Parse(_) => ErrorKind::Parse,
            GatewayError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// HTTP status, for errors that came with one
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::SessionExpired => Some(401),
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the caller must log in again before retrying anything
    pub fn requires_login(&self) -> bool {
        matches!(self, GatewayError::SessionExpired)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err.to_string())
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Pull the `message` field out of an error body
///
/// Anything other than a JSON object with a non-empty string `message`
/// yields [`FALLBACK_ERROR_MESSAGE`].
pub fn extract_error_message(body: &[u8]) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_slice(body).ok();

    parsed
        .as_ref()
        .and_then(|v| v.as_object())
        .and_then(|obj| obj.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_display() {
        assert_eq!(
            GatewayError::SessionExpired.to_string(),
            "Session expired. Please login again."
        );
    }

    #[test]
    fn test_http_error_display_is_message() {
        let err = GatewayError::Http {
            status: 422,
            message: "Bed number already taken".into(),
        };
        assert_eq!(err.to_string(), "Bed number already taken");
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_error_message(br#"{"message":"Ward is full"}"#),
            "Ward is full"
        );
    }

    #[test]
    fn test_extract_message_fallbacks() {
        assert_eq!(extract_error_message(b""), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_error_message(b"<html>502</html>"), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_error_message(br#"{"error":"x"}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_error_message(br#"{"message":""}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_error_message(br#"{"message":42}"#), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_error_message(br#"["message"]"#), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_requires_login() {
        assert!(GatewayError::SessionExpired.requires_login());
        assert!(!GatewayError::Parse("bad".into()).requires_login());
        assert_eq!(GatewayError::SessionExpired.status(), Some(401));
    }
}
