use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{MAX_IMAGE_DIMENSION, MAX_LIST_LIMIT, MAX_MODEL_LENGTH, MAX_PROMPT_LENGTH, MIN_IMAGE_DIMENSION};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub id: i32,
    pub user_id: i32,
    pub prompt: String,
    pub image_url: String,
    pub image_key: String,
    pub model: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub seed: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Row written once the image is safely in storage.
#[derive(Debug, Clone)]
pub struct GenerationInsert {
    pub user_id: i32,
    pub prompt: String,
    pub image_url: String,
    pub image_key: String,
    pub model: String,
    pub width: i32,
    pub height: i32,
    pub seed: i64,
}

// ───── Request Models ────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateImageRequest {
    #[validate(length(
        min = 1,
        max = MAX_PROMPT_LENGTH,
        message = "Prompt must be between 1 and 1000 characters"
    ))]
    pub prompt: String,

    #[validate(length(
        min = 1,
        max = MAX_MODEL_LENGTH,
        message = "Model must be between 1 and 100 characters"
    ))]
    pub model: Option<String>,

    #[validate(range(
        min = MIN_IMAGE_DIMENSION,
        max = MAX_IMAGE_DIMENSION,
        message = "Width must be between 256 and 2048"
    ))]
    pub width: Option<i32>,

    #[validate(range(
        min = MIN_IMAGE_DIMENSION,
        max = MAX_IMAGE_DIMENSION,
        message = "Height must be between 256 and 2048"
    ))]
    pub height: Option<i32>,

    pub seed: Option<i64>,
}

impl GenerateImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        GenerateImageRequest {
            prompt: prompt.into(),
            model: None,
            width: None,
            height: None,
            seed: None,
        }
    }

    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            width: self.width,
            height: self.height,
            seed: self.seed,
        }
    }
}

/// Optional knobs forwarded to the image provider.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub model: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub seed: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListGenerationsQuery {
    #[validate(range(min = 1, max = MAX_LIST_LIMIT, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteGenerationRequest {
    pub id: i32,
}

// ───── Response Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub success: bool,
    pub id: i32,
    pub image_url: String,
    pub prompt: String,
    pub model: String,
    pub width: i32,
    pub height: i32,
    pub seed: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}
