//! Error types for the API client
//!
//! Every terminal failure carries the same structured shape: an optional
//! HTTP status plus whatever machine-readable fields the server returned,
//! so callers can inspect `.status()` or `.message()` uniformly regardless
//! of failure cause.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Decoded error fields from a non-2xx response body
///
/// The backend returns `{"error": "...", "error_ar": "..."}` on most
/// failures; anything it sends beyond the known keys is kept in `extra`.
/// A body that is not valid JSON decodes to the empty value — the status
/// code is still captured on the surrounding [`ApiError`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Primary human-readable error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message (some endpoints use this key instead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any remaining server-supplied fields (`error_ar`, field hints, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ErrorBody {
    /// Best-effort decode; invalid JSON yields the empty body
    #[must_use]
    pub fn from_bytes(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }

    /// Build a body holding just an error message
    #[must_use]
    pub fn from_message(msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
            ..Self::default()
        }
    }

    /// The most specific message the server supplied, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }

    fn summary(&self) -> &str {
        self.text().unwrap_or("no error details")
    }
}

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The stored session is no longer valid (HTTP 401)
    ///
    /// By the time the caller sees this, the session store has been cleared
    /// and a [`SessionExpired`](crate::redirect::SessionExpired) event has
    /// been emitted. Never retried.
    #[error("session expired: {}", .body.summary())]
    AuthExpired {
        /// Server-supplied fields from the 401 body
        body: ErrorBody,
    },

    /// The server answered with a non-2xx status other than 401
    ///
    /// 5xx responses are retried within the budget before surfacing; 4xx
    /// responses are definitive and surface immediately.
    #[error("API error ({status}): {}", .body.summary())]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-supplied error fields (empty if the body was not JSON)
        body: ErrorBody,
    },

    /// Every attempt of the request timed out
    ///
    /// Carries the localized "connection timed out" message and no status.
    #[error("{message}")]
    Timeout {
        /// Localized timeout message
        message: String,
    },

    /// Network-level failure with no HTTP status
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Client construction or configuration problem
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status attached to this failure, if the server answered at all
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Timeout { .. } | Self::Transport(_) | Self::Config(_) => None,
        }
    }

    /// The most specific error message available
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::AuthExpired { body } | Self::Api { body, .. } => body.text(),
            Self::Timeout { message } => Some(message),
            Self::Transport(_) | Self::Config(_) => None,
        }
    }

    /// Check if this error is eligible for another attempt
    ///
    /// Retry only on 5xx, timeout, or transport failures without a status.
    /// Definitive 4xx errors (including 401) are never retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status >= 500,
            Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::AuthExpired { .. } | Self::Config(_) => false,
        }
    }

    /// Check if this is a definitive client error (non-401 4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_decode() {
        let body = ErrorBody::from_bytes(r#"{"error":"Invalid credentials","error_ar":"بيانات الدخول غير صحيحة"}"#.as_bytes());
        assert_eq!(body.text(), Some("Invalid credentials"));
        assert_eq!(
            body.extra.get("error_ar").and_then(|v| v.as_str()),
            Some("بيانات الدخول غير صحيحة")
        );
    }

    #[test]
    fn test_error_body_invalid_json_is_empty() {
        let body = ErrorBody::from_bytes(b"<html>502 Bad Gateway</html>");
        assert_eq!(body, ErrorBody::default());
        assert_eq!(body.text(), None);
    }

    #[test]
    fn test_message_key_fallback() {
        let body = ErrorBody::from_bytes(br#"{"message":"User deactivated"}"#);
        assert_eq!(body.text(), Some("User deactivated"));
    }

    #[test]
    fn test_status_taxonomy() {
        let auth = ApiError::AuthExpired {
            body: ErrorBody::default(),
        };
        assert_eq!(auth.status(), Some(401));
        assert!(!auth.is_retryable());

        let not_found = ApiError::Api {
            status: 404,
            body: ErrorBody::default(),
        };
        assert_eq!(not_found.status(), Some(404));
        assert!(not_found.is_client_error());
        assert!(!not_found.is_retryable());

        let unavailable = ApiError::Api {
            status: 503,
            body: ErrorBody::default(),
        };
        assert!(unavailable.is_server_error());
        assert!(unavailable.is_retryable());

        let timeout = ApiError::Timeout {
            message: "Connection timed out".to_string(),
        };
        assert_eq!(timeout.status(), None);
        assert!(timeout.is_retryable());
    }
}
