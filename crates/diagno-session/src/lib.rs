//! # diagno-session
//!
//! Login state and account operations for the DIAGNO client.
//!
//! - [`InMemorySessionStore`] and [`FileSessionStore`] implement
//!   `SessionStore`.
//! - [`Session`] reads and writes the `authToken` / `currentUser` /
//!   `userName` keys and is the `TokenSource` handed to `ApiClient`.
//! - [`AuthService`] wraps `/auth/*` and `/users/*`.
//!
//! ```rust,ignore
//! let session = Arc::new(Session::new(Arc::new(FileSessionStore::new(path))));
//! let api = ApiClient::new(Arc::new(HttpTransport::from_config(&config)?), session.clone());
//! let auth = AuthService::new(api, session);
//! auth.login("ana", "secret", ROLE_USER)?;
//! ```

pub mod auth;
pub mod session;
pub mod store;

pub use auth::AuthService;
pub use session::Session;
pub use store::{FileSessionStore, InMemorySessionStore};
