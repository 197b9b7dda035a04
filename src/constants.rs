use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Owner id shared by every caller without a session.
pub const GUEST_OWNER_ID: i32 = 0;

pub const MAX_PROMPT_LENGTH: u64 = 1000;
pub const MAX_MODEL_LENGTH: u64 = 100;
pub const MIN_IMAGE_DIMENSION: i32 = 256;
pub const MAX_IMAGE_DIMENSION: i32 = 2048;

pub const DEFAULT_IMAGE_DIMENSION: i32 = 1024;
pub const SEED_UPPER_BOUND: i64 = 1_000_000;

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 100;

pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const GENERATIONS_PREFIX: &str = "generations";
