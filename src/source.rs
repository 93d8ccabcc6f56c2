//! Fetching metrics snapshots from remote agents
//!
//! The poller only depends on the [`MetricsSource`] trait; [`HttpMetricsSource`]
//! is the production implementation that talks to the management hub's agent
//! API over HTTP.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{instrument, trace};

use crate::MetricsSnapshot;

/// Errors that can occur while fetching a snapshot
#[derive(Debug)]
pub enum FetchError {
    /// The request could not be sent or the response body not read
    Request(reqwest::Error),

    /// The agent endpoint answered with a non-success status
    Status(reqwest::StatusCode),

    /// The response body was not a valid metrics payload
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Request(err) => write!(f, "metrics request failed: {}", err),
            FetchError::Status(status) => write!(f, "agent returned HTTP {}", status),
            FetchError::Decode(err) => write!(f, "failed to decode metrics payload: {}", err),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Request(err) => Some(err),
            FetchError::Decode(err) => Some(err),
            FetchError::Status(_) => None,
        }
    }
}

/// Asynchronous read of one subject's current metrics
///
/// Implementations may fail with network or authorization errors; the poller
/// treats every failure the same way (notify and retry on the next tick).
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch(&self, subject: &str) -> Result<MetricsSnapshot, FetchError>;
}

/// Production source polling the hub's `/agent/api/{id}/metrics` endpoint
pub struct HttpMetricsSource {
    /// HTTP client (reused across requests for efficiency)
    client: reqwest::Client,

    /// Hub base URL without trailing slash
    base_url: String,

    /// Optional bearer token for the agent API
    token: Option<String>,
}

impl HttpMetricsSource {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            token,
        }
    }

    fn metrics_url(&self, subject: &str) -> String {
        format!("{}/agent/api/{}/metrics", self.base_url, subject)
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    #[instrument(skip(self))]
    async fn fetch(&self, subject: &str) -> Result<MetricsSnapshot, FetchError> {
        let url = self.metrics_url(subject);

        trace!("requesting metrics from {url}");

        let mut request = self.client.get(&url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await.map_err(FetchError::Request)?;
        let snapshot = serde_json::from_str(&body).map_err(FetchError::Decode)?;

        trace!("successfully parsed metrics");

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_url_format() {
        let source = HttpMetricsSource::new("http://hub.example:8080", None);
        assert_eq!(
            source.metrics_url("agent1"),
            "http://hub.example:8080/agent/api/agent1/metrics"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let source = HttpMetricsSource::new("http://hub.example:8080/", None);
        assert_eq!(
            source.metrics_url("agent1"),
            "http://hub.example:8080/agent/api/agent1/metrics"
        );
    }
}
