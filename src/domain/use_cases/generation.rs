use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    constants::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, PNG_CONTENT_TYPE},
    entities::{
        generation::{GenerateImageRequest, GenerateImageResponse, GenerationInsert, GenerationRecord, SuccessResponse},
        model::ModelDescriptor,
    },
    errors::AppError,
    repositories::{
        downloader::ImageDownloader,
        generation::GenerationRepository,
        provider::ImageProvider,
        storage::ObjectStorage,
    },
    utils::storage_key::{image_key, random_suffix},
};

/// Runs the provider → download → upload → persist chain and the owner-scoped gallery queries.
pub struct GenerationHandler {
    pub generation_repo: Arc<dyn GenerationRepository>,
    pub provider: Arc<dyn ImageProvider>,
    pub downloader: Arc<dyn ImageDownloader>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl GenerationHandler {
    pub fn new(
        generation_repo: Arc<dyn GenerationRepository>,
        provider: Arc<dyn ImageProvider>,
        downloader: Arc<dyn ImageDownloader>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        GenerationHandler {
            generation_repo,
            provider,
            downloader,
            storage,
        }
    }

    /// Generates an image for `owner_id` and records it.
    ///
    /// A record is written only after the upload succeeded. If the write itself fails the
    /// uploaded object stays behind without a row; it is logged with its key.
    pub async fn generate(
        &self,
        owner_id: i32,
        request: GenerateImageRequest,
    ) -> Result<GenerateImageResponse, AppError> {
        request.validate()?;

        let generation = self.provider.request_generation(&request.prompt, &request.options());
        info!(
            owner_id,
            model = %generation.model,
            width = generation.width,
            height = generation.height,
            seed = generation.seed,
            "Requesting image from provider"
        );

        let bytes = self.downloader.fetch(&generation.resource_url).await?;

        let key = image_key(owner_id, Utc::now().timestamp_millis(), &random_suffix());
        let stored = self.storage.put(&key, bytes, PNG_CONTENT_TYPE).await?;

        let insert = GenerationInsert {
            user_id: owner_id,
            prompt: generation.prompt,
            image_url: stored.url,
            image_key: stored.key,
            model: generation.model,
            width: generation.width,
            height: generation.height,
            seed: generation.seed,
        };

        let record = self
            .generation_repo
            .create_generation(&insert)
            .await
            .inspect_err(|e| {
                warn!(image_key = %insert.image_key, error = %e, "Generation stored but not recorded; object is orphaned");
            })?;

        info!(owner_id, id = record.id, "Generation recorded");

        Ok(GenerateImageResponse {
            success: true,
            id: record.id,
            image_url: record.image_url,
            prompt: record.prompt,
            model: insert.model,
            width: insert.width,
            height: insert.height,
            seed: insert.seed,
        })
    }

    /// Lists the owner's generations, newest first.
    pub async fn list_generations(
        &self,
        owner_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<GenerationRecord>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        self.generation_repo.list_generations_by_owner(owner_id, limit).await
    }

    /// Deletes a generation when `owner_id` owns it. Unknown or foreign ids are a no-op.
    pub async fn delete_generation(&self, owner_id: i32, id: i32) -> Result<SuccessResponse, AppError> {
        let removed = self.generation_repo.delete_generation(owner_id, id).await?;
        if removed == 0 {
            info!(owner_id, id, "Delete matched no generation for this owner");
        }
        Ok(SuccessResponse::ok())
    }

    pub fn list_models(&self) -> Vec<ModelDescriptor> {
        self.provider.list_models()
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.generation_repo.check_connection().await
    }
}
