use once_cell::sync::Lazy;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;

use crate::constants::{GENERATIONS_PREFIX, GUEST_OWNER_ID};

const SUFFIX_LENGTH: usize = 8;

static IMAGE_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^generations/(?:\d+|guest-[a-z0-9]+)/\d+-[a-z0-9]+\.png$")
        .expect("image key pattern is a valid regex")
});

/// Random lowercase alphanumeric tag used to keep keys unique.
pub fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LENGTH)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Builds `generations/<owner>/<millis>-<suffix>.png`.
///
/// Guests share owner id 0, so their directory is `guest-<suffix>` instead of the id.
pub fn image_key(owner_id: i32, timestamp_millis: i64, suffix: &str) -> String {
    let owner_segment = if owner_id == GUEST_OWNER_ID {
        format!("guest-{}", suffix)
    } else {
        owner_id.to_string()
    };
    format!("{}/{}/{}-{}.png", GENERATIONS_PREFIX, owner_segment, timestamp_millis, suffix)
}

pub fn is_image_key(key: &str) -> bool {
    IMAGE_KEY_PATTERN.is_match(key)
}
