//! Client configuration.
//!
//! `ClientConfig` is read from a TOML document; every key is optional and
//! falls back to the defaults below. The API base URL can also be set
//! through the `DIAGNO_API_URL` environment variable, which wins over the
//! file.
//!
//! ```toml
//! api_base_url = "https://diagno.example.org/api"
//! session_path = "/home/ana/.diagno/session.json"
//! fallback = "unavailable"
//! auto_navigate_ms = 2000
//! log_filter = "diagno=debug"
//! request_timeout_secs = 20
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use diagno_contracts::error::{DiagnoError, DiagnoResult};

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "DIAGNO_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";

/// What to show when the prediction backend cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Fabricate a random result so the flow keeps working offline.
    #[default]
    Synthesize,
    /// Report the service as unavailable.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Where the file-backed session store keeps its JSON map.
    pub session_path: PathBuf,
    pub fallback: FallbackPolicy,
    /// Delay before leaving the prediction screen after a saved report.
    pub auto_navigate_ms: u64,
    /// `tracing-subscriber` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// `None` keeps the HTTP client's default timeout.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_path: default_session_path(),
            fallback: FallbackPolicy::default(),
            auto_navigate_ms: 2000,
            log_filter: "warn".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `DiagnoError::ConfigError` if the TOML is malformed or a key
    /// has the wrong type.
    pub fn from_toml_str(s: &str) -> DiagnoResult<Self> {
        toml::from_str(s).map_err(|e| DiagnoError::ConfigError {
            reason: format!("failed to parse client config TOML: {}", e),
        })
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> DiagnoResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DiagnoError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given (defaults otherwise), then apply the
    /// environment override.
    pub fn load(path: Option<&Path>) -> DiagnoResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Replace `api_base_url` with `url` when it is set and non-empty.
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }
}

/// `~/.diagno/session.json`, or `./.diagno/session.json` without a home
/// directory.
pub fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".diagno")
        .join("session.json")
}
