//! The API client: request construction, per-request authorization and
//! response interpretation.
//!
//! Every call follows the same pipeline:
//!
//!   path + body → attach bearer from TokenSource → Transport::send
//!     → non-2xx? `Status { status, message }`
//!     → body decode fails? `MalformedResponse`
//!     → typed value
//!
//! Callers decide what to do with the three failure kinds; the auth and
//! report clients collapse them with `DiagnoError::surface`, the prediction
//! client replaces them with a fallback result.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use diagno_contracts::{
    account::MessageResponse,
    error::{DiagnoError, DiagnoResult},
};

use crate::traits::{ApiRequest, ApiResponse, Method, TokenSource, Transport};

/// Sends requests through a `Transport`, attaching the current bearer token
/// from a `TokenSource` to each one.
///
/// Cheap to clone; clones share the transport and token source.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenSource>) -> Self {
        Self { transport, tokens }
    }

    /// `GET path`, decoding the JSON body as `T`.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> DiagnoResult<T> {
        let response = self.execute(Method::Get, path, None)?;
        decode(&response)
    }

    /// `POST path` with a JSON body, decoding the JSON response as `T`.
    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> DiagnoResult<T> {
        let response = self.execute(Method::Post, path, Some(to_json(body)?))?;
        decode(&response)
    }

    /// `POST path`, ignoring whatever the backend sends back on success.
    pub fn post_ack<B: Serialize>(&self, path: &str, body: Option<&B>) -> DiagnoResult<()> {
        let body = body.map(to_json).transpose()?;
        self.execute(Method::Post, path, body)?;
        Ok(())
    }

    /// Build the request, send it, and turn non-2xx statuses into errors.
    fn execute(&self, method: Method, path: &str, body: Option<Value>) -> DiagnoResult<ApiResponse> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            bearer: self.tokens.bearer_token(),
            body,
        };

        debug!(
            method = method.as_str(),
            path = %request.path,
            authorized = request.bearer.is_some(),
            "sending request"
        );

        let response = self.transport.send(&request)?;

        if !response.is_success() {
            debug!(method = method.as_str(), path = %path, status = response.status, "request failed");
            return Err(DiagnoError::Status {
                status: response.status,
                message: backend_message(&response.body),
            });
        }

        Ok(response)
    }
}

fn to_json<B: Serialize>(body: &B) -> DiagnoResult<Value> {
    serde_json::to_value(body).map_err(|e| DiagnoError::InvalidInput {
        reason: format!("failed to serialize request body: {}", e),
    })
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> DiagnoResult<T> {
    serde_json::from_str(&response.body).map_err(|e| DiagnoError::MalformedResponse {
        reason: e.to_string(),
    })
}

/// Pull `message` out of an error body shaped like `{ "message": ... }`.
fn backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<MessageResponse>(body)
        .ok()
        .map(|m| m.message)
}
