//! The persisted login session.
//!
//! Three keys are kept in the underlying `SessionStore`:
//!
//! | key           | value                                          |
//! |---------------|------------------------------------------------|
//! | `authToken`   | bearer token from the last login               |
//! | `currentUser` | JSON `User` (id, username, email, fullName, role) |
//! | `userName`    | display name used in greetings; outlives logout |
//!
//! A `Session` is shared by `Arc`; the `ApiClient` reads the token from it
//! through `TokenSource` on every request.

use std::sync::Arc;

use tracing::warn;

use diagno_contracts::{
    account::{LoginResponse, User},
    error::{DiagnoError, DiagnoResult},
};
use diagno_core::traits::{SessionStore, TokenSource};

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "currentUser";
pub const DISPLAY_NAME_KEY: &str = "userName";

/// Greeting name used when none has been stored.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> DiagnoResult<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    /// The stored user record.
    ///
    /// An entry that no longer parses as a `User` reads as logged out.
    pub fn current_user(&self) -> DiagnoResult<Option<User>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "stored user record is unreadable");
                Ok(None)
            }
        }
    }

    /// True when both a token and a user record are present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_))) && matches!(self.current_user(), Ok(Some(_)))
    }

    pub fn display_name(&self) -> String {
        self.store
            .get(DISPLAY_NAME_KEY)
            .ok()
            .flatten()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
    }

    /// Store a trimmed display name. Blank names are ignored.
    pub fn set_display_name(&self, name: &str) -> DiagnoResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        self.store.set(DISPLAY_NAME_KEY, name)
    }

    /// Persist the user record and token from a successful login. The role
    /// is stored exactly as the backend sent it; the display name is left
    /// alone.
    ///
    /// The user record goes first: a failed token write leaves no bearer
    /// behind.
    pub fn establish(&self, login: &LoginResponse) -> DiagnoResult<()> {
        let user = serde_json::to_string(&login.user()).map_err(|e| DiagnoError::Store {
            reason: format!("failed to encode user record: {}", e),
        })?;
        self.store.set(USER_KEY, &user)?;
        self.store.set(TOKEN_KEY, &login.token)
    }

    /// Forget the token and the user record. The display name survives.
    pub fn clear(&self) -> DiagnoResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }
}

impl TokenSource for Session {
    fn bearer_token(&self) -> Option<String> {
        match self.token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "cannot read token; sending request without one");
                None
            }
        }
    }
}
