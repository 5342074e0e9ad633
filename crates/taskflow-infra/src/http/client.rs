//! reqwest-backed [`ApiClient`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use taskflow_core::RequestError;
use taskflow_core::ports::{ApiClient, CredentialSource, RequestBody};
use taskflow_shared::ErrorBody;

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base address every path is joined to (e.g., http://localhost:8000)
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl HttpConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TASKFLOW_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: std::env::var("TASKFLOW_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

/// API client bound to one base URL.
///
/// The credential is read from the session on every call, so a login or
/// logout takes effect on the next request.
pub struct HttpApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl HttpApiClient {
    pub fn new(
        config: HttpConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, RequestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RequestError::transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    async fn send(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Value, RequestError> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!("api_request", method, path, request_id = %request_id);

        async move {
            let mut request = request.header(REQUEST_ID_HEADER, &request_id);
            if let Some(credential) = self.credentials.credential() {
                request = request.header(AUTHORIZATION, credential.bearer());
            }

            let response = request.send().await.map_err(|e| {
                tracing::warn!(error = %e, "Request failed to reach server");
                RequestError::transport(e.to_string())
            })?;

            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| RequestError::transport(e.to_string()))?;

            if !status.is_success() {
                let message = ErrorBody::parse(&bytes).and_then(|body| body.message());
                tracing::debug!(status = status.as_u16(), message = ?message, "Request rejected");
                return Err(RequestError::status(status.as_u16(), message));
            }

            tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "Request succeeded");
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            serde_json::from_slice(&bytes).map_err(|e| RequestError::decode(e.to_string()))
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, RequestError> {
        let request = self.request(Method::GET, path).query(query);
        self.send("GET", path, request).await
    }

    async fn post(&self, path: &str, body: RequestBody) -> Result<Value, RequestError> {
        let request = match body {
            RequestBody::Json(json) => self.request(Method::POST, path).json(&json),
            RequestBody::Form(fields) => self.request(Method::POST, path).form(&fields),
        };
        self.send("POST", path, request).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, RequestError> {
        let request = self.request(Method::PUT, path).json(&body);
        self.send("PUT", path, request).await
    }

    async fn delete(&self, path: &str) -> Result<Value, RequestError> {
        let request = self.request(Method::DELETE, path);
        self.send("DELETE", path, request).await
    }
}
