use async_trait::async_trait;

use crate::errors::AppError;

#[async_trait]
pub trait ImageDownloader: Send + Sync {
    /// Fetches the bytes behind `url`. Any non-success response is an `UpstreamFetch` error.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError>;
}
