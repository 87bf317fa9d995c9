//! Error type shared by every resource operation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for resource operations.
pub type Result<T> = std::result::Result<T, OmiseError>;

/// Errors from API operations.
///
/// Every failure, whether raised by the transport or while mapping a
/// response onto a typed resource, surfaces as this one type.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct OmiseError {
    /// Error category.
    pub code: OmiseErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status of the failed response (if one was received).
    pub status: Option<u16>,

    /// Error code reported by the API body, e.g. `not_found`.
    pub api_code: Option<String>,
}

impl OmiseError {
    /// Create a new error.
    pub fn new(code: OmiseErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            api_code: None,
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(OmiseErrorCode::Network, message)
    }

    /// Create an API error from a non-success response.
    pub fn api(status: u16, api_code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code: OmiseErrorCode::Api,
            message: message.into(),
            status: Some(status),
            api_code,
        }
    }

    /// Create a decode error for a body that is not a JSON object.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(OmiseErrorCode::Decode, message)
    }

    /// Create an error for an embedded object whose tag does not match.
    pub fn unexpected_object(expected: &str, found: &str) -> Self {
        Self::new(
            OmiseErrorCode::UnexpectedObject,
            format!("expected object '{}', found '{}'", expected, found),
        )
    }

    /// Create an error for an attribute an operation depends on.
    pub fn missing_attribute(key: &str) -> Self {
        Self::new(
            OmiseErrorCode::MissingAttribute,
            format!("missing attribute '{}'", key),
        )
    }

    /// Whether the same request could succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        match self.code {
            OmiseErrorCode::Network => true,
            OmiseErrorCode::Api => matches!(self.status, Some(429) | Some(500..=599)),
            _ => false,
        }
    }

    /// Whether the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404) || self.api_code.as_deref() == Some("not_found")
    }
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmiseErrorCode {
    /// Request never produced a response.
    Network,

    /// API answered with a non-success status.
    Api,

    /// Response body could not be decoded.
    Decode,

    /// Embedded object carried a different `object` tag.
    UnexpectedObject,

    /// A required attribute was absent.
    MissingAttribute,
}

impl fmt::Display for OmiseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OmiseErrorCode::Network => "network_error",
            OmiseErrorCode::Api => "api_error",
            OmiseErrorCode::Decode => "decode_error",
            OmiseErrorCode::UnexpectedObject => "unexpected_object",
            OmiseErrorCode::MissingAttribute => "missing_attribute",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = OmiseError::api(404, Some("not_found".into()), "customer was not found");
        assert_eq!(err.to_string(), "api_error: customer was not found");
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(OmiseError::network("connection reset").is_retryable());
    }

    #[test]
    fn server_and_rate_limit_errors_are_retryable() {
        assert!(OmiseError::api(429, None, "slow down").is_retryable());
        assert!(OmiseError::api(503, None, "unavailable").is_retryable());
        assert!(!OmiseError::api(400, Some("bad_request".into()), "nope").is_retryable());
    }

    #[test]
    fn local_errors_are_not_retryable() {
        assert!(!OmiseError::decode("garbage").is_retryable());
        assert!(!OmiseError::missing_attribute("location").is_retryable());
        assert!(!OmiseError::unexpected_object("card", "charge").is_retryable());
    }

    #[test]
    fn not_found_by_status_or_api_code() {
        assert!(OmiseError::api(404, None, "gone").is_not_found());
        assert!(OmiseError::api(400, Some("not_found".into()), "gone").is_not_found());
        assert!(!OmiseError::network("down").is_not_found());
    }

    #[test]
    fn unexpected_object_message_names_both_tags() {
        let err = OmiseError::unexpected_object("card", "charge");
        assert_eq!(err.code, OmiseErrorCode::UnexpectedObject);
        assert!(err.message.contains("card"));
        assert!(err.message.contains("charge"));
    }
}
