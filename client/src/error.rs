//! Error types for the check-in client

use crate::validate::ValidationError;
use thiserror::Error;

/// Errors returned by the authenticated API client
///
/// Every failed request normalizes to one of these; callers get a tagged
/// `Result` instead of a transport-specific error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, DNS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("API error (status {status}): {}", message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` field of the response body, when there is one
        message: Option<String>,
        /// Response body, when it was JSON
        body: Option<serde_json::Value>,
    },

    /// A success response whose body did not match the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided message, if the response carried one
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// HTTP status, if a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// Errors from reading or writing the persisted session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session file could not be read or written
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Session file contents are not a valid session
    #[error("Session file is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors from the endpoint resolver
///
/// The display strings are the messages shown to the operator.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Domain or passcode left blank
    #[error("domain and passcode are required")]
    MissingFields,

    /// A field failed its local check; nothing was sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The resolver answered but refused the request
    #[error("{0}")]
    Rejected(String),

    /// The resolver could not be reached
    #[error("please try again")]
    Transport(String),

    /// The resolution succeeded but could not be persisted
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors from account operations (login, registration, deletion)
#[derive(Debug, Error)]
pub enum AccountError {
    /// A field failed its local check; nothing was sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The request itself failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Login answered without an access token
    #[error("login failed")]
    MissingToken,

    /// The session could not be persisted
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AccountError {
    /// Message to show the operator, preferring the server's wording
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(error) => error.message().unwrap_or(fallback).to_string(),
            Self::MissingToken => fallback.to_string(),
            Self::Invalid(error) => error.to_string(),
            Self::Session(error) => error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_server_message() {
        let error = ApiError::Status {
            status: 404,
            message: Some("ticket not found".to_string()),
            body: None,
        };
        assert_eq!(error.message(), Some("ticket not found"));
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.to_string(), "API error (status 404): ticket not found");
    }

    #[test]
    fn transport_error_has_no_message() {
        let error = ApiError::Transport("connection refused".to_string());
        assert_eq!(error.message(), None);
        assert_eq!(error.status(), None);
    }

    #[test]
    fn account_error_prefers_server_message() {
        let error = AccountError::Api(ApiError::Status {
            status: 401,
            message: Some("wrong password".to_string()),
            body: None,
        });
        assert_eq!(error.user_message("login failed"), "wrong password");
        assert_eq!(
            AccountError::Api(ApiError::Transport("x".into())).user_message("login failed"),
            "login failed"
        );
    }

    #[test]
    fn invalid_field_message_is_shown_as_is() {
        let error = AccountError::from(ValidationError::PasswordTooShort);
        assert_eq!(error.user_message("login failed"), "password must be at least 6 characters");
    }
}
