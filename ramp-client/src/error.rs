//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response reached the client (connect refused, reset, DNS, ...)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request deadline elapsed before a response arrived
    #[error("Request timed out")]
    Timeout,

    /// The client's cancellation token fired while the request was in flight
    #[error("Request cancelled")]
    Cancelled,

    /// The server answered with an error status
    #[error("API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// A 401 on a call made while the session was believed to be valid
    #[error("Session expired")]
    SessionExpired,

    /// Success status but the body could not be used
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A protected call was attempted with no authenticated user
    #[error("Authentication required")]
    NotAuthenticated,

    /// Another login/logout/restore is still running on this session
    #[error("Another auth operation is in progress")]
    AuthInProgress,

    /// Bad configuration or request path
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

impl ClientError {
    /// Build an API error from a status and the raw response body.
    ///
    /// The message comes from the server's `{"msg": ...}` body when there is
    /// one, otherwise from the status reason.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = shared::ErrorBody::parse(body)
            .and_then(|b| b.message().map(str::to_string))
            .unwrap_or_else(|| fallback_message(status));
        Self::Api { status, message }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(StatusCode::FORBIDDEN)
    }

    /// True when the server was never reached
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }

    /// Message suitable for showing next to the control that failed
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) | Self::Timeout => "Network error or server unavailable".into(),
            Self::SessionExpired => "Your session has expired. Please log in again.".into(),
            Self::NotAuthenticated => "Please log in first.".into(),
            other => other.to_string(),
        }
    }
}

fn fallback_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed: {} {}", status.as_u16(), reason),
        None => format!("Request failed: {}", status.as_u16()),
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_server_msg() {
        let err = ClientError::from_status(StatusCode::FORBIDDEN, r#"{"msg":"forbidden"}"#);
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(message, "forbidden");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_from_status_fallback() {
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.user_message(), "Request failed: 502 Bad Gateway");
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_classification() {
        let unauthorized = ClientError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_forbidden());
        assert!(ClientError::SessionExpired.is_unauthorized());
        assert!(ClientError::Timeout.is_network());
        assert!(!ClientError::Cancelled.is_network());
        assert_eq!(ClientError::NotAuthenticated.status(), None);
    }
}
