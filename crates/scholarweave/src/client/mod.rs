//! ScholarWeave backend API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - A fixed per-request timeout
//! - Request logging middleware
//!
//! No retry or caching layer: every call hits the backend once.

mod middleware;

pub use middleware::RequestLogging;

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde_json::Value;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{HealthResponse, SearchResponse};

/// ScholarWeave backend client.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Backend base URL, without a trailing slash.
    base_url: String,

    /// Request timeout, reported in timeout errors.
    request_timeout: Duration,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("scholarweave/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let client = ClientBuilder::new(client).with(RequestLogging).build();

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// Backend base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check backend health.
    ///
    /// Returns `Ok(None)` when the backend answered successfully but with an empty
    /// or falsy payload.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, timeout or non-2xx response.
    pub async fn health(&self) -> ClientResult<Option<HealthResponse>> {
        let url = self.endpoint("/health");
        let value = self.get(&url, &[]).await?;

        if is_empty_payload(&value) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(value)?))
    }

    /// Search for papers. The query is sent verbatim as the `q` parameter.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, timeout or non-2xx response.
    pub async fn search(&self, query: &str) -> ClientResult<SearchResponse> {
        let url = self.endpoint("/papers/search");
        let value = self.get(&url, &[("q", query)]).await?;

        if value.is_null() {
            return Ok(SearchResponse::default());
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a single paper by id.
    ///
    /// The id is percent-encoded into one path segment, so ids containing `/` or
    /// other reserved characters address the right resource. The payload is
    /// returned raw (`Value::Null` for an empty body).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, timeout or non-2xx response (including 404).
    pub async fn get_by_id(&self, id: &str) -> ClientResult<Value> {
        let url = self.endpoint(&paper_path(id));
        self.get(&url, &[]).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request and decode the body as JSON (`Null` if empty).
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> ClientResult<Value> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, self.request_timeout))?;

        let response = self.handle_response(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_transport(e.into(), self.request_timeout))?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = backend_message(&text);
        tracing::debug!(status = status.as_u16(), %message, "Backend returned error status");

        match status.as_u16() {
            404 => Err(ClientError::not_found(message)),
            400 => Err(ClientError::bad_request(message)),
            500..=599 => Err(ClientError::server(status.as_u16(), message)),
            _ => Err(ClientError::UnexpectedStatus { status: status.as_u16(), message }),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Backend path for a paper, with the id percent-encoded as a single segment.
#[must_use]
pub fn paper_path(id: &str) -> String {
    format!("/papers/{}", urlencoding::encode(id))
}

/// Whether a payload counts as "no data": `null`, `false`, `0` or an empty string.
#[must_use]
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Extract the `error` field from the backend's JSON error envelope, else the raw text.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
