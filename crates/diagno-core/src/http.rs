//! `reqwest`-backed transport.

use std::time::Duration;

use reqwest::blocking::Client;

use diagno_contracts::error::{DiagnoError, DiagnoResult};

use crate::{
    config::ClientConfig,
    traits::{ApiRequest, ApiResponse, Method, Transport},
};

/// Sends requests to a real backend over HTTP(S).
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g. `http://localhost:8081/api`).
    ///
    /// `timeout` of `None` keeps the HTTP client's default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> DiagnoResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DiagnoError::ConfigError {
            reason: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> DiagnoResult<Self> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> DiagnoResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| {
            let reason = if e.is_connect() {
                format!("cannot connect to {}", self.base_url)
            } else if e.is_timeout() {
                format!("request to {} timed out", url)
            } else {
                e.to_string()
            };
            DiagnoError::Transport { reason }
        })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| DiagnoError::Transport {
            reason: format!("failed to read response body: {}", e),
        })?;

        Ok(ApiResponse { status, body })
    }
}
