//! Resource download: one blocking-style GET per item, body fully buffered.
//!
//! The [`Fetcher`] trait is the seam between the driver and the network.
//! [`HttpFetcher`] is the production implementation; tests inject an
//! in-memory one so no live host is needed.

use crate::error::{ItemError, PublishError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Retrieves raw bytes for a direct-content URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ItemError>;
}

/// `reqwest`-backed fetcher. No retry, no streaming.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PublishError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ItemError> {
        let transport = |e: reqwest::Error| {
            if e.is_timeout() {
                ItemError::FetchTimeout {
                    url: url.to_string(),
                    secs: self.timeout_secs,
                }
            } else {
                ItemError::FetchFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ItemError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
