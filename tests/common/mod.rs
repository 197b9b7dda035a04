#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use imagegen_backend::{
    auth::session::JwtSessionService,
    entities::{
        generation::{GenerationInsert, GenerationRecord},
        user::User,
    },
    errors::AppError,
    provider::pollinations::PollinationsClient,
    repositories::{
        downloader::ImageDownloader,
        generation::GenerationRepository,
        storage::{ObjectStorage, StoredObject},
        user::UserRepository,
    },
    settings::{AppConfig, AppEnvironment, SessionCookieSettings},
    use_cases::{auth::AuthHandler, generation::GenerationHandler},
    AppState,
};
use parking_lot::Mutex;

pub const STORAGE_BASE_URL: &str = "https://cdn.test/media";
pub const TEST_SESSION_SECRET: &str = "test_session_secret_that_is_long_enough_123";

/// PNG signature followed by filler so content sniffing recognises the bytes.
pub const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        database_url: "postgres://unused".to_string(),
        session_secret: TEST_SESSION_SECRET.to_string(),
        public_base_url: STORAGE_BASE_URL.to_string(),
        ..Default::default()
    }
}

// ───── Generation repository ─────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryGenerationRepo {
    records: Mutex<Vec<GenerationRecord>>,
}

impl InMemoryGenerationRepo {
    pub fn all(&self) -> Vec<GenerationRecord> {
        self.records.lock().clone()
    }

    /// Seeds a record directly, bypassing the generation pipeline.
    pub fn seed(&self, owner_id: i32, prompt: &str) -> GenerationRecord {
        let mut records = self.records.lock();
        let id = records.len() as i32 + 1;
        let record = GenerationRecord {
            id,
            user_id: owner_id,
            prompt: prompt.to_string(),
            image_url: format!("{}/seeded/{}.png", STORAGE_BASE_URL, id),
            image_key: format!("seeded/{}.png", id),
            model: Some("flux".to_string()),
            width: Some(1024),
            height: Some(1024),
            seed: Some(7),
            created_at: Utc::now() + Duration::milliseconds(id as i64),
        };
        records.push(record.clone());
        record
    }
}

#[async_trait]
impl GenerationRepository for InMemoryGenerationRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_generation(&self, generation: &GenerationInsert) -> Result<GenerationRecord, AppError> {
        let mut records = self.records.lock();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = GenerationRecord {
            id,
            user_id: generation.user_id,
            prompt: generation.prompt.clone(),
            image_url: generation.image_url.clone(),
            image_key: generation.image_key.clone(),
            model: Some(generation.model.clone()),
            width: Some(generation.width),
            height: Some(generation.height),
            seed: Some(generation.seed),
            created_at: Utc::now() + Duration::milliseconds(id as i64),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list_generations_by_owner(&self, owner_id: i32, limit: i64) -> Result<Vec<GenerationRecord>, AppError> {
        let mut owned: Vec<GenerationRecord> = self
            .records
            .lock()
            .iter()
            .filter(|r| r.user_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        owned.truncate(limit.max(0) as usize);
        Ok(owned)
    }

    async fn delete_generation(&self, owner_id: i32, id: i32) -> Result<u64, AppError> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| !(r.id == id && r.user_id == owner_id));
        Ok((before - records.len()) as u64)
    }
}

// ───── Storage ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail_puts: bool,
}

impl InMemoryStorage {
    pub fn failing() -> Self {
        InMemoryStorage {
            objects: Mutex::new(HashMap::new()),
            fail_puts: true,
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().keys().cloned().collect()
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.lock().get(key).map(|(_, ct)| ct.clone())
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .insert(key.to_string(), (data.to_vec(), "image/png".to_string()));
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<StoredObject, AppError> {
        if self.fail_puts {
            return Err(AppError::Storage("bucket unavailable".to_string()));
        }
        self.objects
            .lock()
            .insert(key.to_string(), (data, content_type.to_string()));
        Ok(StoredObject {
            key: key.to_string(),
            url: format!("{}/{}", STORAGE_BASE_URL, key),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.objects.lock().get(key).map(|(data, _)| data.clone()))
    }
}

// ───── Downloader ────────────────────────────────────────────────────

/// Returns canned bytes and records which URLs were requested.
#[derive(Default)]
pub struct RecordingDownloader {
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl RecordingDownloader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl ImageDownloader for RecordingDownloader {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().push(url.to_string());
        Ok(FAKE_PNG.to_vec())
    }
}

// ───── Users ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn with_user(id: i32, open_id: &str) -> Self {
        let repo = InMemoryUserRepo::default();
        let now = Utc::now();
        repo.users.lock().push(User {
            id,
            open_id: open_id.to_string(),
            name: Some("Test User".to_string()),
            email: Some("user@example.com".to_string()),
            login_method: Some("oauth".to_string()),
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        });
        repo
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn get_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().iter().find(|u| u.open_id == open_id).cloned())
    }
}

// ───── Wiring ────────────────────────────────────────────────────────

pub struct Harness {
    pub repo: Arc<InMemoryGenerationRepo>,
    pub storage: Arc<InMemoryStorage>,
    pub downloader: Arc<RecordingDownloader>,
    pub users: Arc<InMemoryUserRepo>,
    pub sessions: Arc<JwtSessionService>,
}

impl Harness {
    pub fn new() -> Self {
        Harness::with_parts(InMemoryStorage::default(), InMemoryUserRepo::default())
    }

    pub fn with_parts(storage: InMemoryStorage, users: InMemoryUserRepo) -> Self {
        Harness {
            repo: Arc::new(InMemoryGenerationRepo::default()),
            storage: Arc::new(storage),
            downloader: Arc::new(RecordingDownloader::default()),
            users: Arc::new(users),
            sessions: Arc::new(JwtSessionService::new(&test_config())),
        }
    }

    pub fn generation_handler(&self) -> GenerationHandler {
        GenerationHandler::new(
            self.repo.clone(),
            Arc::new(PollinationsClient::default()),
            self.downloader.clone(),
            self.storage.clone(),
        )
    }

    pub fn app_state(&self) -> AppState {
        let config = test_config();
        AppState::from_parts(
            AuthHandler::new(self.users.clone(), self.sessions.clone()),
            self.generation_handler(),
            self.storage.clone(),
            SessionCookieSettings::from(&config),
        )
    }
}
