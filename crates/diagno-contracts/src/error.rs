//! Client error types.
//!
//! All fallible operations in the DIAGNO crates return `DiagnoResult<T>`.
//! Transport, status and body failures are kept distinct here so callers
//! can decide how to collapse them; the auth and report clients fold every
//! one of them into `RequestFailed` before it reaches a user.

use thiserror::Error;

/// The unified error type for the DIAGNO client.
#[derive(Debug, Error)]
pub enum DiagnoError {
    /// The request never produced an HTTP response (connect, DNS, timeout).
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// The backend answered with a non-2xx status.
    ///
    /// `message` carries the backend's JSON `message` field when the body
    /// had one.
    #[error("backend returned status {status}")]
    Status { status: u16, message: Option<String> },

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response body: {reason}")]
    MalformedResponse { reason: String },

    /// A user-facing failure carrying either the backend message or a fixed
    /// default string for the call site.
    #[error("{message}")]
    RequestFailed { message: String },

    /// An operation needed a logged-in session and there was none.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A disease tag outside `diabetes | heart | stroke | parkinsons`.
    #[error("unknown disease type '{tag}'")]
    UnknownDisease { tag: String },

    /// A form field name or value was rejected.
    #[error("field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// The form still has fields outside their declared bounds.
    #[error("form constraints violated: {}", .violations.join("; "))]
    FormConstraint { violations: Vec<String> },

    /// A record could not be converted to or from its typed form.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The session store could not be read or written.
    #[error("session store error: {reason}")]
    Store { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl DiagnoError {
    /// The backend-provided message, if this error carries one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            DiagnoError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Collapse any error into `RequestFailed`, preferring the backend's own
    /// message and falling back to `default`.
    pub fn surface(self, default: &str) -> DiagnoError {
        let message = self
            .backend_message()
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string());
        DiagnoError::RequestFailed { message }
    }
}

/// Convenience alias used throughout the DIAGNO crates.
pub type DiagnoResult<T> = Result<T, DiagnoError>;
