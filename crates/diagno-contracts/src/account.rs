//! Account, login and relative-management wire types.
//!
//! Roles are carried as the backend's strings (`"USER"`, `"RELATIVE"`) and
//! stored verbatim in the session; the client never interprets them beyond
//! display.

use serde::{Deserialize, Serialize};

/// Role of a primary account holder.
pub const ROLE_USER: &str = "USER";
/// Role of an account created by another user through add-relative.
pub const ROLE_RELATIVE: &str = "RELATIVE";

/// A user record as returned by `/users/profile` and `/users/relatives`,
/// and as persisted in the session store (optional fields absent there).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

fn bearer() -> String {
    "Bearer".to_string()
}

/// Response of `POST /auth/signin`: the token plus the user's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "type", default = "bearer")]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl LoginResponse {
    /// The user record persisted after a successful login.
    pub fn user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role.clone(),
            phone_number: None,
            gender: None,
            age: None,
        }
    }
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

/// Body of `POST /auth/add-relative`: a full signup record plus an optional
/// relationship label ("spouse", "child", ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddRelativeRequest {
    #[serde(flatten)]
    pub account: SignupRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

/// The `{ "message": ... }` body the backend uses for acks and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
