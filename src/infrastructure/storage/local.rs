use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::{
    errors::AppError,
    repositories::storage::{ObjectStorage, StoredObject},
};

/// Filesystem-backed object store whose objects are served back under `base_url`.
#[derive(Clone, Debug)]
pub struct LocalObjectStorage {
    base_dir: PathBuf,
    base_url: String,
}

impl LocalObjectStorage {
    pub fn new(base_dir: impl Into<PathBuf>, base_url: &str) -> Self {
        LocalObjectStorage {
            base_dir: base_dir.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key.trim_start_matches('/'))
    }

    pub fn resolve_path(&self, key: &str) -> Result<PathBuf> {
        let normalized = Path::new(key.trim_start_matches('/'));
        if normalized.as_os_str().is_empty() {
            bail!("empty object key");
        }
        if normalized.components().any(|c| !matches!(c, Component::Normal(_))) {
            bail!("object key {key:?} escapes the storage root");
        }
        Ok(self.base_dir.join(normalized))
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.resolve_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, data)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.resolve_path(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
        }
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<StoredObject, AppError> {
        let path = self
            .write(key, &data)
            .await
            .map_err(|e| AppError::Storage(format!("{:#}", e)))?;

        debug!(key, content_type, path = %path.display(), size = data.len(), "Stored object");

        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        self.read(key)
            .await
            .map_err(|e| AppError::Storage(format!("{:#}", e)))
    }
}
