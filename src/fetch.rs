//! HTTP fetch capability
//!
//! The poller never talks to the network directly; it is constructed with a
//! [`Fetch`] implementation. Production code injects [`HttpFetcher`], tests
//! inject stubs.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::types::{EndpointUrl, RequestTimeout};

/// A failed fetch
///
/// The poller's policy does not branch on the variant — every variant means
/// "this tick's value is lost, keep the previous one". The variants exist so
/// log lines say what actually went wrong.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, or timeout failure before a response arrived
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not valid JSON
    #[error("malformed body: {0}")]
    Body(#[source] serde_json::Error),
}

/// Capability to GET a JSON document from an endpoint
///
/// Object-safe so the poller can hold `Arc<dyn Fetch>`.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issue one GET and parse the body as JSON
    async fn get_json(&self, url: &EndpointUrl) -> Result<Value, FetchError>;
}

/// Production fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given per-request timeout
    pub fn new(timeout: RequestTimeout) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout.as_duration())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_json(&self, url: &EndpointUrl) -> Result<Value, FetchError> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // Fetch the body as text first so JSON errors are distinguishable
        // from transport errors in the logs.
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(FetchError::Body)
    }
}
