pub mod downloader;
pub mod generation;
pub mod provider;
pub mod sqlx_repo;
pub mod storage;
pub mod token;
pub mod user;
