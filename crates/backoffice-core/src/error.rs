//! Error types for the back-office data-access layer.
//!
//! One unified error type with explicit variants for transport, session,
//! server-reported, validation and storage failures. Which of these a caller
//! ever sees depends on the fallback policy of the service it called.

use std::fmt;
use thiserror::Error;
use validator::ValidationErrors;

/// The unified error type for back-office operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Session errors (missing or rejected tokens).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The server answered, but not with a usable success.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Client-side validation failed before anything was sent.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The durable session store could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Whether the server rejected the session credentials.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Protocol(err) => err.is_auth_error(),
            _ => false,
        }
    }

    /// Whether this error came from client-side validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
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

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The response body was not the JSON we expected.
    #[error("malformed response body: {message}")]
    Decode { message: String },
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Session-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session has expired or was revoked.
    #[error("session expired")]
    SessionExpired,

    /// No refresh token is stored.
    #[error("no refresh token available")]
    MissingRefreshToken,
}

/// An unsuccessful answer from the API.
///
/// Carries the HTTP status and whatever the error envelope told us.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// `responseCode` from the envelope, if present.
    pub response_code: Option<String>,
    /// `message` from the envelope, if present.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.response_code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, response_code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            response_code,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.response_code.as_deref() == Some("UNAUTHORIZED")
            || self.response_code.as_deref() == Some("TOKEN_EXPIRED")
            || self.response_code.as_deref() == Some("INVALID_TOKEN")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Page numbers start at 1.
    #[error("invalid page {value}: pages start at 1")]
    Page { value: u32 },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A required field is empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A field failed a format check.
    #[error("invalid {field}: {reason}")]
    Field { field: String, reason: String },

    /// No local record with the given identifier.
    #[error("unknown record '{id}'")]
    UnknownRecord { id: String },
}

impl From<ValidationErrors> for InvalidInputError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the first failing field; the form only shows one message.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "failed validation".to_string());
                InvalidInputError::Field {
                    field: field.to_string(),
                    reason,
                }
            }
            None => InvalidInputError::Field {
                field: "input".to_string(),
                reason: errors.to_string(),
            },
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::InvalidInput(InvalidInputError::from(errors))
    }
}

/// Session storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The stored session could not be parsed.
    #[error("corrupt session file {path}: {message}")]
    Corrupt { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_includes_envelope_fields() {
        let err = ProtocolError::new(
            404,
            Some("NOT_FOUND".to_string()),
            Some("No such corporate".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 404 [NOT_FOUND]: No such corporate");
    }

    #[test]
    fn unauthorized_status_is_auth_error() {
        assert!(ProtocolError::new(401, None, None).is_auth_error());
        assert!(ProtocolError::new(400, Some("TOKEN_EXPIRED".into()), None).is_auth_error());
        assert!(!ProtocolError::new(500, None, None).is_auth_error());
    }

    #[test]
    fn decode_errors_are_transport_errors() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Transport(TransportError::Decode { .. })));
    }
}
