use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::generation::{GenerationInsert, GenerationRecord},
    errors::AppError,
    repositories::sqlx_repo::SqlxGenerationRepo,
};

#[async_trait]
pub trait GenerationRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_generation(&self, generation: &GenerationInsert) -> Result<GenerationRecord, AppError>;
    async fn list_generations_by_owner(&self, owner_id: i32, limit: i64) -> Result<Vec<GenerationRecord>, AppError>;
    /// Returns the number of rows removed; zero when the id is unknown or owned by someone else.
    async fn delete_generation(&self, owner_id: i32, id: i32) -> Result<u64, AppError>;
}

impl SqlxGenerationRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxGenerationRepo { pool }
    }
}

#[async_trait]
impl GenerationRepository for SqlxGenerationRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn create_generation(&self, generation: &GenerationInsert) -> Result<GenerationRecord, AppError> {
        let record = sqlx::query_as::<_, GenerationRecord>(
            r#"
            INSERT INTO generations (
                user_id, prompt, image_url, image_key, model, width, height, seed
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, prompt, image_url, image_key, model, width, height, seed, created_at
            "#
        )
        .bind(generation.user_id)
        .bind(&generation.prompt)
        .bind(&generation.image_url)
        .bind(&generation.image_key)
        .bind(&generation.model)
        .bind(generation.width)
        .bind(generation.height)
        .bind(generation.seed)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_generations_by_owner(&self, owner_id: i32, limit: i64) -> Result<Vec<GenerationRecord>, AppError> {
        let records = sqlx::query_as::<_, GenerationRecord>(
            r#"
            SELECT id, user_id, prompt, image_url, image_key, model, width, height, seed, created_at
            FROM generations
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn delete_generation(&self, owner_id: i32, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"DELETE FROM generations WHERE id = $1 AND user_id = $2"#
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
