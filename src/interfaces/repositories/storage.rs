use async_trait::async_trait;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<StoredObject, AppError>;
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;
}
