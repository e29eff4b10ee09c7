//! Client for the APOD endpoint, with a bounded linear retry on transient failures.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::ApiError;
use crate::types::{sort_newest_first, Apod};

pub const APOD_PATH: &str = "/apod";

/// Raw GET against the remote service. Returns the body of a 2xx response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, ApiError>;
}

/// `reqwest`-backed transport; appends `api_key` to every request.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).with_context(|| format!("invalid API base URL: {base_url}"))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("apodview/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Status { status, body });
        }
        Ok(body)
    }
}

/// How many extra attempts a transient failure gets, and the delay step.
/// The n-th retry waits `n * base_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self { Self { retries: 2, base_delay: Duration::from_secs(1) } }
}

impl RetryPolicy {
    pub fn delay_for(&self, retry: u32) -> Duration { self.base_delay * retry }
}

#[derive(Clone)]
pub struct ApodClient {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl ApodClient {
    pub fn new(transport: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// GET and decode, retrying 429/5xx up to the policy's budget. Any other
    /// error, or the last transient one, is returned as-is.
    pub async fn get_with_retry<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let mut retry = 0;
        loop {
            match self.transport.get(path, query).await {
                Ok(body) => return serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string())),
                Err(e) if e.retryable() && retry < self.retry.retries => {
                    retry += 1;
                    let delay = self.retry.delay_for(retry);
                    tracing::warn!(status = e.status(), retry, delay_ms = delay.as_millis() as u64, "transient APOD error; retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Entries for `start..=end` (`YYYY-MM-DD`), newest first.
    pub async fn fetch_range(&self, start: &str, end: &str) -> Result<Vec<Apod>, ApiError> {
        let query = [("start_date", start.to_string()), ("end_date", end.to_string()), ("thumbs", "true".to_string())];
        let mut items: Vec<Apod> = self.get_with_retry(APOD_PATH, &query).await?;
        sort_newest_first(&mut items);
        tracing::info!(start, end, count = items.len(), "fetched APOD range");
        Ok(items)
    }

    pub async fn fetch_by_date(&self, date: &str) -> Result<Apod, ApiError> {
        let query = [("date", date.to_string()), ("thumbs", "true".to_string())];
        let apod: Apod = self.get_with_retry(APOD_PATH, &query).await?;
        tracing::info!(date, "fetched APOD entry");
        Ok(apod)
    }
}
