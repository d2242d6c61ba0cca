//! Route guard evaluation.
//!
//! 1. Find the first rule whose pattern matches the path.
//! 2. `public` → `Allow`.
//! 3. `authenticated` → `Allow` with a session, else `Redirect` to `/login`.
//! 4. No rule matched → `Redirect` to `/` (catch-all).

use std::path::Path;

use tracing::{debug, warn};

use diagno_contracts::error::{DiagnoError, DiagnoResult};

use crate::rule::{Access, GuardConfig};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

const DEFAULT_ROUTES: &str = include_str!("../routes/default.toml");

/// What the front end should do with a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { to: String, reason: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// The path to actually open for a request to `path`.
    pub fn destination<'a>(&'a self, path: &'a str) -> &'a str {
        match self {
            GuardDecision::Allow => path,
            GuardDecision::Redirect { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    config: GuardConfig,
}

impl RouteGuard {
    /// Returns `DiagnoError::ConfigError` if the TOML is malformed or does
    /// not match `GuardConfig`.
    pub fn from_toml_str(s: &str) -> DiagnoResult<Self> {
        let config: GuardConfig = toml::from_str(s).map_err(|e| DiagnoError::ConfigError {
            reason: format!("failed to parse route table TOML: {}", e),
        })?;
        Ok(Self { config })
    }

    pub fn from_file(path: &Path) -> DiagnoResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DiagnoError::ConfigError {
            reason: format!("failed to read route table '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The route table the DIAGNO screens ship with.
    pub fn default_routes() -> DiagnoResult<Self> {
        Self::from_toml_str(DEFAULT_ROUTES)
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn evaluate(&self, path: &str, authenticated: bool) -> GuardDecision {
        let Some(rule) = self.config.routes.iter().find(|r| r.matches(path)) else {
            warn!(path, "no route matches; redirecting home");
            return GuardDecision::Redirect {
                to: HOME_PATH.to_string(),
                reason: format!("no route matches '{}'", path),
            };
        };

        debug!(path, pattern = %rule.path, access = ?rule.access, authenticated, "route matched");

        match rule.access {
            Access::Public => GuardDecision::Allow,
            Access::Authenticated if authenticated => GuardDecision::Allow,
            Access::Authenticated => {
                warn!(path, "protected route without a session; redirecting to login");
                GuardDecision::Redirect {
                    to: LOGIN_PATH.to_string(),
                    reason: format!("'{}' requires a logged-in user", path),
                }
            }
        }
    }
}
