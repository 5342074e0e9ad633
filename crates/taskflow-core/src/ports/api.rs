//! Backend transport port.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RequestError;

/// Payload of a `POST`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

/// HTTP client addressed relative to one base URL.
///
/// Implementations attach the current credential as a bearer header when
/// one is present and send the request unauthenticated otherwise. They do
/// not retry, cache or rate-limit. Empty success bodies decode as
/// [`Value::Null`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, RequestError>;

    async fn post(&self, path: &str, body: RequestBody) -> Result<Value, RequestError>;

    async fn put(&self, path: &str, body: Value) -> Result<Value, RequestError>;

    async fn delete(&self, path: &str) -> Result<Value, RequestError>;
}

/// Decode a response body into a typed value.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RequestError> {
    serde_json::from_value(value).map_err(|e| RequestError::decode(e.to_string()))
}
