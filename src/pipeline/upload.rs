//! Image-host upload: base64 form POST, JSON response with a hosted URL.
//!
//! This is the only stage that talks to the image host. [`ImageHost`] is the
//! seam the driver depends on; [`ImgbbHost`] implements the imgbb API:
//!
//! ```text
//! POST /1/upload   key=<api key>&image=<base64 png>
//! 200 {"data": {"url": "https://i.ibb.co/…/A.png", …}, "success": true, "status": 200}
//! ```
//!
//! No retry: a failed upload is reported with the raw response body and the
//! item is recorded as failed.

use crate::error::{ItemError, PublishError};
use crate::pipeline::encode::to_base64;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Publishes an encoded image and returns its hosted URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// `name` identifies the image in diagnostics (e.g. `A.png`).
    async fn upload(&self, name: &str, png: &[u8]) -> Result<String, ItemError>;
}

/// imgbb upload client.
#[derive(Clone)]
pub struct ImgbbHost {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for ImgbbHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImgbbHost")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ImgbbHost {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PublishError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: Option<bool>,
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
}

/// Interpret a 2xx upload response body.
///
/// `success` must be `true`; `data.url` must be present and non-empty.
pub fn parse_upload_response(name: &str, body: &str) -> Result<String, ItemError> {
    let parsed: UploadResponse =
        serde_json::from_str(body).map_err(|_| ItemError::UploadMalformed {
            name: name.to_string(),
            body: body.to_string(),
        })?;

    if parsed.success != Some(true) {
        return Err(ItemError::UploadRejected {
            name: name.to_string(),
            body: body.to_string(),
        });
    }

    parsed
        .data
        .and_then(|d| d.url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ItemError::UploadMalformed {
            name: name.to_string(),
            body: body.to_string(),
        })
}

#[async_trait]
impl ImageHost for ImgbbHost {
    async fn upload(&self, name: &str, png: &[u8]) -> Result<String, ItemError> {
        let transport = |e: reqwest::Error| ItemError::UploadFailed {
            name: name.to_string(),
            reason: e.to_string(),
        };

        let encoded = to_base64(png);
        let form = [("key", self.api_key.as_str()), ("image", encoded.as_str())];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(ItemError::UploadStatus {
                name: name.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let url = parse_upload_response(name, &body)?;
        debug!("Uploaded {} ({} bytes) → {}", name, png.len(), url);
        Ok(url)
    }
}
