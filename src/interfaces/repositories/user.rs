use async_trait::async_trait;

use crate::{
    entities::user::User,
    errors::AppError,
    repositories::sqlx_repo::SqlxUserRepo,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn get_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, open_id, name, email, login_method, role, created_at, updated_at, last_signed_in
            FROM users
            WHERE open_id = $1
            "#
        )
        .bind(open_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
