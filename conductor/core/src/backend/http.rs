//! HTTP Backend Implementation
//!
//! JSON over HTTP against the Taskmaster server.
//!
//! # Endpoints
//!
//! - `GET /api/tasks` - full task collection
//! - `POST /api/tasks` - create, body `{"description": ..}`
//! - `PATCH /api/tasks/{id}/complete` - check off
//! - `DELETE /api/tasks/{id}` - remove
//! - `POST /api/ai` - body `{"text": ..}`, answers `{"call": .., "tasks": [..]}`
//!
//! Non-success answers carry `{"error": ..}` when the server produced them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::traits::{TaskBackend, TransportError, GENERIC_FAILURE};
use crate::calls::ChatReply;
use crate::config::ClientConfig;
use crate::tasks::{TaskCollection, TaskId};

/// HTTP task backend client
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// Server root, e.g. `http://127.0.0.1:5000/`
    base_url: Url,
    /// Upper bound for one round trip
    timeout: Duration,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for `base_url`
    ///
    /// # Errors
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(base_url.to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            base_url,
            timeout,
            http_client,
        })
    }

    /// Create from [`ClientConfig`]
    ///
    /// # Errors
    ///
    /// See [`HttpBackend::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(&config.base_url, config.request_timeout)
    }

    /// Build the URL for a list of path segments (each one percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Perform one round trip and decode the JSON answer
    ///
    /// # Errors
    ///
    /// Non-success statuses become [`TransportError::Status`] with the message
    /// extracted by [`error_message`]; undecodable success bodies become
    /// [`TransportError::Decode`].
    pub async fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(method = %method, url = %url, "Backend request");

        let mut request = self.http_client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(&e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.map_send_error(&e))?;

        if !status.is_success() {
            let message = error_message(&bytes);
            tracing::warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                message = %message,
                "Backend returned an error"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        decode_success(status, &bytes)
    }

    /// Round trip decoded into a concrete type
    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<T, TransportError> {
        let value = self.request(method, segments, body).await?;
        serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
    }

    fn map_send_error(&self, e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            tracing::warn!(timeout_secs = self.timeout.as_secs(), "Backend request timed out");
            TransportError::Timeout(self.timeout)
        } else {
            tracing::warn!(error = %e, "Backend unreachable");
            TransportError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl TaskBackend for HttpBackend {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn list_tasks(&self) -> Result<TaskCollection, TransportError> {
        self.request_as(Method::GET, &["api", "tasks"], None).await
    }

    async fn create_task(&self, description: &str) -> Result<(), TransportError> {
        let body = json!({ "description": description });
        self.request(Method::POST, &["api", "tasks"], Some(&body))
            .await
            .map(drop)
    }

    async fn complete_task(&self, id: &TaskId) -> Result<(), TransportError> {
        let id = id.to_path_segment();
        self.request(Method::PATCH, &["api", "tasks", &id, "complete"], None)
            .await
            .map(drop)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TransportError> {
        let id = id.to_path_segment();
        self.request(Method::DELETE, &["api", "tasks", &id], None)
            .await
            .map(drop)
    }

    async fn interpret(&self, text: &str) -> Result<ChatReply, TransportError> {
        let body = json!({ "text": text });
        self.request_as(Method::POST, &["api", "ai"], Some(&body)).await
    }
}

/// Extract a user-facing message from an error payload
///
/// Prefers the payload's `error` string, then the payload's compact JSON
/// form, then the raw text. An empty payload yields [`GENERIC_FAILURE`].
#[must_use]
pub fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return GENERIC_FAILURE.to_string();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(payload) => match payload.get("error").and_then(Value::as_str) {
            Some(error) if !error.is_empty() => error.to_string(),
            _ => payload.to_string(),
        },
        Err(_) => text.to_string(),
    }
}

/// Decode a success body
fn decode_success(status: StatusCode, body: &[u8]) -> Result<Value, TransportError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))
}
