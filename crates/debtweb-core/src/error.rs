//! Error types for debtweb-core
//!
//! Every failure the client can hit while talking to the backend or
//! updating the page is a `ClientError`. Each variant carries an error code
//! and severity, and converts to `ErrorDetails` with suggestions for display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when a failed response has no body
pub const REQUEST_FAILED: &str = "Request failed";

/// Message used when a response body is not valid JSON
pub const INVALID_RESPONSE: &str = "Invalid server response";

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend answered with a non-success status
    RequestFailed,
    /// Response body was not valid JSON
    InvalidResponse,
    /// JSON did not have the expected shape
    UnexpectedPayload,
    /// Request never produced a response
    TransportError,
    /// Dashboard password missing or rejected
    Unauthorized,
    /// Page element the client needs is absent
    MissingElement,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::RequestFailed => write!(f, "REQUEST_FAILED"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::UnexpectedPayload => write!(f, "UNEXPECTED_PAYLOAD"),
            ErrorCode::TransportError => write!(f, "TRANSPORT_ERROR"),
            ErrorCode::Unauthorized => write!(f, "UNAUTHORIZED"),
            ErrorCode::MissingElement => write!(f, "MISSING_ELEMENT"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for display and logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// HTTP status, when the backend answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// `error` field of a JSON error body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<String>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            status: None,
            backend_error: None,
            suggestions: vec![],
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(status) = self.status {
            write!(f, "\nStatus: {}", status)?;
        }
        if let Some(ref error) = self.backend_error {
            write!(f, "\nBackend: {}", error)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for the ledger client
///
/// `Display` yields the bare message so it can be shown to the user as-is,
/// the same text that ends up in a form's status region or an alert.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Non-success HTTP status. Message is the response body or a fallback.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Body was not parseable JSON.
    #[error("{message}")]
    InvalidResponse { message: String },

    #[error("Unexpected {expected} payload: {message}")]
    UnexpectedPayload { expected: String, message: String },

    #[error("Request could not be sent: {message}")]
    Transport { message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Missing page element: {selector}")]
    MissingElement { selector: String },
}

impl ClientError {
    /// Build a request error from a failed response body
    pub fn request(status: u16, body: &str) -> Self {
        ClientError::Request {
            status,
            message: failure_message(body),
        }
    }

    pub fn invalid_response() -> Self {
        ClientError::InvalidResponse {
            message: INVALID_RESPONSE.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Request { .. } => ErrorCode::RequestFailed,
            ClientError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            ClientError::UnexpectedPayload { .. } => ErrorCode::UnexpectedPayload,
            ClientError::Transport { .. } => ErrorCode::TransportError,
            ClientError::Unauthorized => ErrorCode::Unauthorized,
            ClientError::MissingElement { .. } => ErrorCode::MissingElement,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::Request { status, .. } if *status < 500 => ErrorSeverity::Warning,
            ClientError::Request { .. } => ErrorSeverity::Error,
            ClientError::InvalidResponse { .. } => ErrorSeverity::Error,
            ClientError::UnexpectedPayload { .. } => ErrorSeverity::Error,
            ClientError::Transport { .. } => ErrorSeverity::Error,
            ClientError::Unauthorized => ErrorSeverity::Warning,
            ClientError::MissingElement { .. } => ErrorSeverity::Info,
        }
    }

    /// HTTP status of the failed response, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            ClientError::Request { status, message } => {
                details = details.with_status(*status);
                details.backend_error = backend_error(message);
                match *status {
                    401 => {
                        details = details.with_suggestion(
                            "Set auth.password in your config file.".to_string(),
                        );
                    }
                    404 => {
                        details = details.with_suggestion(
                            "The entry may already have been deleted; reload the ledger."
                                .to_string(),
                        );
                    }
                    _ => {}
                }
            }
            ClientError::InvalidResponse { .. } | ClientError::UnexpectedPayload { .. } => {
                details = details.with_suggestion(
                    "Check that server.url and server.base_path point at the dashboard.".to_string(),
                );
            }
            ClientError::Transport { .. } => {
                details = details.with_suggestion(
                    "Check that the backend is running and reachable.".to_string(),
                );
            }
            ClientError::Unauthorized => {
                details = details.with_suggestion(
                    "Set auth.password in your config file.".to_string(),
                );
            }
            ClientError::MissingElement { .. } => {}
        }

        details
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Message for a failed response: the body text, or a fallback when empty
pub fn failure_message(body: &str) -> String {
    if body.is_empty() {
        REQUEST_FAILED.to_string()
    } else {
        body.to_string()
    }
}

/// The `error` field of a JSON error object such as the backend's 401 reply
pub fn backend_error(body: &str) -> Option<String> {
    match serde_json::from_str(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("error") {
            Some(serde_json::Value::String(error)) => Some(error.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Log a client error with its code, mirroring its severity
pub fn log_error(operation: &str, error: &ClientError) {
    match error.severity() {
        ErrorSeverity::Error => log::error!(
            target: "debtweb::error",
            "ERROR [{}] {} - Operation: {}",
            error.code(),
            error,
            operation
        ),
        ErrorSeverity::Warning => log::warn!(
            target: "debtweb::error",
            "WARNING [{}] {} - Operation: {}",
            error.code(),
            error,
            operation
        ),
        ErrorSeverity::Info => log::info!(
            target: "debtweb::error",
            "[{}] {} - Operation: {}",
            error.code(),
            error,
            operation
        ),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::RequestFailed.to_string(), "REQUEST_FAILED");
        assert_eq!(ErrorCode::InvalidResponse.to_string(), "INVALID_RESPONSE");
        assert_eq!(ErrorCode::MissingElement.to_string(), "MISSING_ELEMENT");
    }

    #[test]
    fn test_request_error_carries_body() {
        let error = ClientError::request(400, "bad input");
        assert_eq!(error.to_string(), "bad input");
        assert_eq!(error.status(), Some(400));
        assert_eq!(error.code(), ErrorCode::RequestFailed);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_request_error_fallback_message() {
        let error = ClientError::request(500, "");
        assert_eq!(error.to_string(), REQUEST_FAILED);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_failure_message_is_body_verbatim() {
        let body = r#"{"error": "Authentication required"}"#;
        assert_eq!(failure_message(body), body);
        assert_eq!(failure_message("[1, 2]"), "[1, 2]");

        let error = ClientError::request(401, body);
        assert_eq!(error.to_string(), body);
    }

    #[test]
    fn test_details_extract_backend_error() {
        let details =
            ClientError::request(401, r#"{"error": "Authentication required"}"#).to_details();
        assert_eq!(details.backend_error.as_deref(), Some("Authentication required"));
        assert!(details.to_string().contains("Backend: Authentication required"));

        assert_eq!(backend_error(r#"{"detail": "x"}"#), None);
        assert_eq!(backend_error("bad input"), None);
        assert!(ClientError::request(400, "bad input").to_details().backend_error.is_none());
    }

    #[test]
    fn test_invalid_response_message() {
        let error = ClientError::invalid_response();
        assert_eq!(error.to_string(), INVALID_RESPONSE);
        assert_eq!(error.code(), ErrorCode::InvalidResponse);
    }

    #[test]
    fn test_error_details_not_found() {
        let details = ClientError::request(404, "Record not found.").to_details();
        assert_eq!(details.status, Some(404));
        assert!(!details.suggestions.is_empty());
        assert!(details.to_string().contains("Record not found."));
    }
}
