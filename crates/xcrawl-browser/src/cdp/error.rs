//! CDP error types.

use thiserror::Error;
use xcrawl_core::SessionError;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answering DevTools discovery at the endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// Timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Connection to the browser is gone.
    #[error("Session closed")]
    SessionClosed,

    /// Invalid response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for SessionError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::NavigationFailed(msg) => SessionError::Navigation(msg),
            CdpError::JavaScript(msg) => SessionError::Script(msg),
            CdpError::Timeout(msg) => SessionError::Timeout(msg),
            CdpError::SessionClosed => SessionError::Closed,
            _ => SessionError::Driver(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdp_error_display() {
        let err = CdpError::Protocol {
            code: -32000,
            message: "Cannot find context with specified id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CDP error: Cannot find context with specified id (code: -32000)"
        );
    }

    #[test]
    fn test_session_error_from_cdp() {
        let err: SessionError =
            CdpError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".into()).into();
        assert!(matches!(
            err,
            SessionError::Navigation(ref m) if m == "net::ERR_NAME_NOT_RESOLVED"
        ));

        let err: SessionError = CdpError::JavaScript("SyntaxError: bad xpath".into()).into();
        assert!(matches!(err, SessionError::Script(_)));

        let err: SessionError = CdpError::SessionClosed.into();
        assert!(matches!(err, SessionError::Closed));

        let err: SessionError = CdpError::WebSocket("reset".into()).into();
        assert_eq!(err.to_string(), "Driver error: WebSocket error: reset");
    }

    #[test]
    fn test_url_parse_error() {
        let err: CdpError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.to_string().contains("Invalid URL"));
    }
}
