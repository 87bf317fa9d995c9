//! HTTP transport for the Omise API.
//!
//! Implements the `Transport` port over reqwest. Every request is
//! authenticated with HTTP basic auth using the secret key as the user name
//! and an empty password.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TransportConfig::new("skey_test_xxx").with_api_version("2019-05-29");
//! let transport = HttpTransport::new(config)?;
//! let client = Client::new(transport);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::domain::{Attributes, OmiseError};
use crate::ports::{ApiRequest, Method, Transport};

use super::query::flatten_params;

/// Production API base URL.
pub const DEFAULT_API_URL: &str = "https://api.omise.co";

/// Header pinning the API version.
pub const API_VERSION_HEADER: &str = "Omise-Version";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("omise-rust/", env!("CARGO_PKG_VERSION"));

/// Transport configuration.
#[derive(Clone)]
pub struct TransportConfig {
    /// Secret API key (skey_...).
    secret_key: SecretString,

    /// Base URL for the API (default: https://api.omise.co).
    api_url: String,

    /// Pinned API version, sent as `Omise-Version`.
    api_version: Option<String>,

    /// Whole-request timeout.
    timeout: Duration,
}

impl TransportConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_url: DEFAULT_API_URL.to_string(),
            api_version: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ApiConfig> for TransportConfig {
    fn from(config: &ApiConfig) -> Self {
        let mut transport = TransportConfig::new(config.secret_key.clone())
            .with_api_url(config.api_url.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs));
        if let Some(version) = &config.api_version {
            transport = transport.with_api_version(version.clone());
        }
        transport
    }
}

/// reqwest-backed transport.
pub struct HttpTransport {
    config: TransportConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, OmiseError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OmiseError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Error object returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Turn a status and body into attributes or an error.
fn parse_response(status: reqwest::StatusCode, body: &str) -> Result<Attributes, OmiseError> {
    if !status.is_success() {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let api_code = parsed.as_ref().and_then(|e| e.code.clone());
        let message = parsed
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body.to_string()
                }
            });

        tracing::error!(
            status = status.as_u16(),
            code = ?api_code,
            error = %message,
            "Omise API request failed"
        );
        return Err(OmiseError::api(status.as_u16(), api_code, message));
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(attributes)) => Ok(attributes),
        Ok(_) => {
            tracing::warn!("Omise API response body is not a JSON object");
            Err(OmiseError::decode("response body is not a JSON object"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse Omise API response");
            Err(OmiseError::decode(format!("Invalid JSON: {}", e)))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Attributes, OmiseError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, path = %request.path, "Sending Omise API request");

        let builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
            Method::Patch => self.http_client.patch(&url),
            Method::Delete => self.http_client.delete(&url),
        };

        let mut builder = builder.basic_auth(
            self.config.secret_key.expose_secret(),
            Option::<&str>::None,
        );

        if let Some(version) = &self.config.api_version {
            builder = builder.header(API_VERSION_HEADER, version.as_str());
        }

        if request.method.uses_query() {
            let query = flatten_params(&request.params);
            if !query.is_empty() {
                builder = builder.query(&query);
            }
        } else {
            builder = builder.json(&request.params);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, path = %request.path, "Omise API request could not be sent");
            OmiseError::network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OmiseError::network(format!("Failed to read response body: {}", e)))?;

        parse_response(status, &body)
    }
}
