//! REST client abstraction for the console server API.
//!
//! Everything above this layer talks to the server through the [`ApiClient`]
//! trait and its single `invoke(method, path, body)` operation. The trait is
//! the seam where tests substitute an in-memory client for [`HttpClient`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// reqwest-backed client
pub mod http;

pub use http::HttpClient;

/// HTTP methods used by the console API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by API calls and local form validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        detailed: Option<String>,
    },

    /// The response body did not match the expected schema
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A local precondition failed before any request was issued
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body returned by the console server: `{ code, message, detailedMessage }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "detailedMessage")]
    pub detailed_message: Option<String>,
}

impl ErrorPayload {
    /// Build an [`ApiError`] for `status`, falling back to `fallback` when the body carries no message
    pub fn into_error(self, status: u16, fallback: &str) -> ApiError {
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .or_else(|| self.detailed_message.clone())
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Http {
            status,
            message,
            detailed: self.detailed_message,
        }
    }
}

/// Authenticated access to the console REST API
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issue `method path` with an optional JSON body.
    ///
    /// Returns the parsed JSON response, or [`Value::Null`] for an empty body.
    async fn invoke(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError>;
}

/// Deserialize a response into a typed record, rejecting schema mismatches
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
