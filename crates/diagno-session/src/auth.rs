//! Account operations against `/auth/*` and `/users/*`.

use std::sync::Arc;

use tracing::info;

use diagno_contracts::{
    account::{AddRelativeRequest, LoginRequest, LoginResponse, SignupRequest, User},
    error::DiagnoResult,
};
use diagno_core::ApiClient;

use crate::session::Session;

/// Login, signup and relative management.
///
/// Every failure reaching the caller is a `DiagnoError::RequestFailed`
/// carrying the backend's message, or the per-operation default below.
pub struct AuthService {
    api: ApiClient,
    session: Arc<Session>,
}

impl AuthService {
    /// `api` should read its bearer from the same `session`.
    pub fn new(api: ApiClient, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// `POST /auth/signin`, then persist the session.
    pub fn login(&self, username: &str, password: &str, role: &str) -> DiagnoResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        };
        let response: LoginResponse = self
            .api
            .post("/auth/signin", &request)
            .map_err(|e| e.surface("Login failed"))?;

        self.session
            .establish(&response)
            .map_err(|e| e.surface("Login failed"))?;

        info!(username = %response.username, role = %response.role, "logged in");
        Ok(response)
    }

    pub fn signup(&self, request: &SignupRequest) -> DiagnoResult<()> {
        self.api
            .post_ack("/auth/signup", Some(request))
            .map_err(|e| e.surface("Signup failed"))?;
        info!(username = %request.username, "account created");
        Ok(())
    }

    /// Forget the token and user record. Later requests go out
    /// without `Authorization`.
    pub fn logout(&self) -> DiagnoResult<()> {
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }

    pub fn current_user(&self) -> DiagnoResult<Option<User>> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn profile(&self) -> DiagnoResult<User> {
        self.api
            .get("/users/profile")
            .map_err(|e| e.surface("Failed to fetch profile"))
    }

    pub fn relatives(&self) -> DiagnoResult<Vec<User>> {
        self.api
            .get("/users/relatives")
            .map_err(|e| e.surface("Failed to fetch relatives"))
    }

    pub fn add_relative(&self, request: &AddRelativeRequest) -> DiagnoResult<()> {
        self.api
            .post_ack("/auth/add-relative", Some(request))
            .map_err(|e| e.surface("Failed to add relative"))?;
        info!(username = %request.account.username, "relative added");
        Ok(())
    }

    pub fn remove_relative(&self, relative_id: i64) -> DiagnoResult<()> {
        self.api
            .post_ack::<()>(&format!("/users/relatives/{}/remove", relative_id), None)
            .map_err(|e| e.surface("Failed to remove relative"))?;
        info!(relative_id, "relative removed");
        Ok(())
    }
}
