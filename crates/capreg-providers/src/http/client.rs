//! reqwest-backed JSON client

use std::time::Duration;

use async_trait::async_trait;
use capreg_application::BackendConfig;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::{NS_API, SETTING_API_BASE_URL};
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::Value;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::HTTP_USER_AGENT;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Total timeout for requests
    pub timeout: Duration,
    /// Maximum idle connections per host
    pub max_idle_per_host: usize,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(capreg_domain::constants::DEFAULT_API_TIMEOUT_SECS),
            max_idle_per_host: 10,
            user_agent: HTTP_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    /// Configuration with a custom timeout only
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }
}

/// Backend serving the `api` namespace
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Option<String>,
    client: Client,
}

impl ApiClient {
    /// Build a client for `base_url`
    pub fn new(base_url: Option<String>, config: &HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { base_url, client })
    }

    /// The configured base URL
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Full URL of `endpoint` under the base URL
    pub fn endpoint_url(&self, endpoint: &str) -> Result<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| Error::configuration("API base URL is not configured"))?;
        Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ))
    }

    /// GET `endpoint` and decode the JSON response
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "GET");
        Self::send(self.client.get(&url), &url).await
    }

    /// POST `payload` as JSON to `endpoint` and decode the JSON response
    pub async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "POST");
        Self::send(self.client.post(&url).json(payload), &url).await
    }

    async fn send(request: RequestBuilder, url: &str) -> Result<Value> {
        let response = request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                if e.is_timeout() {
                    Error::network_with_source(format!("Request to {url} timed out"), e)
                } else {
                    Error::network_with_source(format!("HTTP request to {url} failed"), e)
                }
            })?;
        response.json().await.map_err(|e| {
            Error::network_with_source(format!("Invalid JSON response from {url}"), e)
        })
    }
}

#[async_trait]
impl CapabilityBackend for ApiClient {
    fn namespace(&self) -> &str {
        NS_API
    }

    async fn initialize(&mut self) -> Result<()> {
        if self.base_url.as_deref().is_none_or(str::is_empty) {
            return Err(Error::configuration("API base URL is not configured"));
        }
        Ok(())
    }

    fn setting(&self, key: &str) -> Option<String> {
        (key == SETTING_API_BASE_URL)
            .then(|| self.base_url.clone())
            .flatten()
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        if lookup.segments.is_empty() {
            return Err(Error::invalid_argument("", "expected an endpoint path"));
        }
        self.get(&lookup.segments.join("/")).await
    }
}

#[linkme::distributed_slice(BACKENDS)]
static API_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_API,
    description: "JSON GET requests against the configured API base URL",
    factory: |config: &BackendConfig| {
        let http = HttpClientConfig::with_timeout(Duration::from_secs(config.api_timeout_secs()));
        Ok(Box::new(ApiClient::new(
            config.api_base_url().map(str::to_string),
            &http,
        )?))
    },
};
