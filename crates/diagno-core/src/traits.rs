//! Core trait definitions for the DIAGNO client.
//!
//! Three seams keep the clients testable without a live backend:
//!
//! - `Transport`   : moves one `ApiRequest` to the backend and back
//! - `SessionStore`: the local key-value store (token, user, display name)
//! - `TokenSource` : where the `ApiClient` reads the bearer token from
//!
//! `ApiClient` asks its `TokenSource` for a token on every request; nothing
//! holds a mutable default header.

use serde_json::Value;

use diagno_contracts::error::DiagnoResult;

/// HTTP verbs the backend API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A fully-resolved request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base URL, starting with `/`.
    pub path: String,
    /// Bearer token to attach as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

/// The raw outcome of a request: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Build a response whose body is `value` serialized as JSON.
    pub fn json(status: u16, value: &Value) -> Self {
        Self { status, body: value.to_string() }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries one request to the backend.
///
/// Implementations return `Err` only when no HTTP response was obtained.
/// Non-2xx responses are returned as `Ok` and interpreted by `ApiClient`.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> DiagnoResult<ApiResponse>;
}

/// A string key-value store standing in for browser local storage.
///
/// Keys are plain strings with no schema versioning. All access is
/// synchronous.
pub trait SessionStore: Send + Sync {
    /// Return the value stored under `key`, if any.
    fn get(&self, key: &str) -> DiagnoResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> DiagnoResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> DiagnoResult<()>;
}

/// Supplies the bearer token for outbound requests.
pub trait TokenSource: Send + Sync {
    /// The current token, or `None` when logged out.
    fn bearer_token(&self) -> Option<String>;
}

/// A `TokenSource` that never has a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenSource for Anonymous {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}
