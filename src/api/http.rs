//! HTTP implementation of [`ApiClient`] using reqwest.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::COOKIE;
use serde_json::Value;
use std::time::Duration;

use super::{ApiClient, ApiError, ErrorPayload, Method};
use crate::config::ServerConfig;
use crate::constants::{ERROR_TOKEN_MISSING, SESSION_COOKIE_NAME};

/// Client for a single console server
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a client for `base_url`.
    ///
    /// When a token is given it is sent both as a bearer token and as the
    /// console session cookie.
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a client from the `[server]` config section
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let token = config.token();
        if token.is_none() {
            warn!("{} '{}'", ERROR_TOKEN_MISSING, config.token_env);
        }
        Ok(Self::new(config.endpoint.clone(), token, config.timeout())?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn invoke(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.into(), &url);
        if let Some(token) = &self.token {
            request = request
                .bearer_auth(token)
                .header(COOKIE, format!("{}={}", SESSION_COOKIE_NAME, token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!("{} {} -> {}", method, url, status);

        if status.is_success() {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            return serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let fallback = status.canonical_reason().unwrap_or("Request failed");
        let payload: ErrorPayload = serde_json::from_slice(&bytes).unwrap_or_default();
        Err(payload.into_error(status.as_u16(), fallback))
    }
}
