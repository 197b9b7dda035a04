pub mod auth;
pub mod db;
pub mod downloader;
pub mod provider;
pub mod storage;
pub mod utils;
