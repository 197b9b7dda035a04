use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{errors::AppError, repositories::downloader::ImageDownloader};

#[derive(Debug, Clone)]
pub struct ReqwestImageDownloader {
    client: Client,
}

impl ReqwestImageDownloader {
    /// `timeout` of `None` keeps reqwest's default, which never gives up on a slow body.
    pub fn new(timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ReqwestImageDownloader { client })
    }
}

#[async_trait]
impl ImageDownloader for ReqwestImageDownloader {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Image provider returned a non-success status");
            return Err(AppError::UpstreamFetch(format!("provider responded with {}", status)));
        }

        let bytes = response.bytes().await?;
        debug!(size = bytes.len(), "Downloaded generated image");
        Ok(bytes.to_vec())
    }
}
