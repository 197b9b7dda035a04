use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, downloader, provider, storage, utils};

use auth::session::JwtSessionService;
use downloader::reqwest_downloader::ReqwestImageDownloader;
use errors::AppError;
use provider::pollinations::PollinationsClient;
use repositories::{
    sqlx_repo::{SqlxGenerationRepo, SqlxUserRepo},
    storage::ObjectStorage,
};
use settings::{AppConfig, SessionCookieSettings};
use storage::local::LocalObjectStorage;
use use_cases::{auth::AuthHandler, generation::GenerationHandler};

pub struct AppState {
    pub auth_handler: AuthHandler,
    pub generation_handler: GenerationHandler,
    pub storage: Arc<dyn ObjectStorage>,
    pub session_cookie: SessionCookieSettings,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        let storage: Arc<dyn ObjectStorage> = Arc::new(
            LocalObjectStorage::new(&config.storage_dir, &config.public_base_url)
        );

        let generation_handler = GenerationHandler::new(
            Arc::new(SqlxGenerationRepo::new(pool.clone())),
            Arc::new(PollinationsClient::new(&config.provider_base_url, &config.default_model)),
            Arc::new(ReqwestImageDownloader::new(config.fetch_timeout())?),
            storage.clone(),
        );

        let auth_handler = AuthHandler::new(
            Arc::new(SqlxUserRepo::new(pool)),
            Arc::new(JwtSessionService::new(config)),
        );

        Ok(AppState::from_parts(
            auth_handler,
            generation_handler,
            storage,
            SessionCookieSettings::from(config),
        ))
    }

    pub fn from_parts(
        auth_handler: AuthHandler,
        generation_handler: GenerationHandler,
        storage: Arc<dyn ObjectStorage>,
        session_cookie: SessionCookieSettings,
    ) -> Self {
        AppState {
            auth_handler,
            generation_handler,
            storage,
            session_cookie,
        }
    }
}
