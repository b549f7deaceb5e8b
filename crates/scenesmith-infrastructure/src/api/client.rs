use super::envelope::{ApiEnvelope, parse_error_body};
use crate::config::ClientConfig;
use reqwest::{Client, Method, RequestBuilder, Url};
use scenesmith_core::{Result, ScenesmithError};
use serde::Serialize;
use std::time::Duration;

/// Thin JSON client for the campaign backend.
///
/// `get_json` / `post_json` / `delete_json` return the decoded envelope;
/// callers pick the member they need.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ScenesmithError::config(format!("Invalid API base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ScenesmithError::config(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScenesmithError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL from path segments, escaping each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScenesmithError::config("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_json(&self, url: Url) -> Result<ApiEnvelope> {
        self.send(self.client.request(Method::GET, url)).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<ApiEnvelope> {
        self.send(self.client.request(Method::POST, url).json(body)).await
    }

    pub async fn delete_json(&self, url: Url) -> Result<ApiEnvelope> {
        self.send(self.client.request(Method::DELETE, url)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiEnvelope> {
        let response = request
            .header("accept", "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let url = response.url().clone();
        tracing::debug!("[ApiClient] {} -> {}", url, status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let err = parse_error_body(status.as_u16(), &body);
            tracing::warn!("[ApiClient] {} failed: {}", url, err);
            return Err(err);
        }

        response.json::<ApiEnvelope>().await.map_err(|e| {
            ScenesmithError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse response from {url}: {e}"),
            }
        })
    }
}

fn map_transport_error(err: reqwest::Error) -> ScenesmithError {
    ScenesmithError::Http {
        status: err.status().map(|s| s.as_u16()),
        message: format!("request failed: {err}"),
        retryable: err.is_connect() || err.is_timeout() || err.is_request(),
    }
}
