#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use shortener_service::api::routes::public_routes;
use shortener_service::application::backoff::BackoffPolicy;
use shortener_service::application::services::ShortenerSettings;
use shortener_service::domain::entities::{NewUrlMapping, UrlMapping};
use shortener_service::domain::repositories::UrlMappingRepository;
use shortener_service::error::AppError;
use shortener_service::infrastructure::persistence::MemoryUrlMappingRepository;
use shortener_service::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const TEST_DOMAIN: &str = "svc.test";

pub fn test_settings() -> ShortenerSettings {
    ShortenerSettings::new("http", TEST_DOMAIN)
}

/// 1 ms, 2 ms, 4 ms, then give up at 8 ms.
pub fn fast_backoff() -> BackoffPolicy {
    BackoffPolicy::new(Duration::from_millis(1), 2.0, Duration::from_millis(8))
}

pub fn create_test_state_with(repository: Arc<dyn UrlMappingRepository>) -> AppState {
    AppState::new(repository, test_settings(), fast_backoff())
}

pub fn create_test_state() -> (AppState, Arc<MemoryUrlMappingRepository>) {
    let repository = Arc::new(MemoryUrlMappingRepository::new());
    let state = create_test_state_with(repository.clone());
    (state, repository)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(public_routes().with_state(state)).unwrap()
}

pub async fn seed_mapping(repository: &MemoryUrlMappingRepository, path: &str, long_url: &str) {
    repository
        .insert_mapping(NewUrlMapping::new(path, long_url))
        .await
        .unwrap();
}

fn storage_down() -> AppError {
    AppError::internal("connection refused", json!({}))
}

/// Repository whose every call fails with a transient error.
#[derive(Default)]
pub struct FailingRepository {
    pub calls: AtomicUsize,
}

impl FailingRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(storage_down())
    }
}

#[async_trait]
impl UrlMappingRepository for FailingRepository {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        self.fail()
    }

    async fn find_long_url_by_path(&self, _path: &str) -> Result<Option<String>, AppError> {
        self.fail()
    }

    async fn find_path_by_long_url(&self, _long_url: &str) -> Result<Option<String>, AppError> {
        self.fail()
    }

    async fn find_visits_by_path(&self, _path: &str) -> Result<Option<i64>, AppError> {
        self.fail()
    }

    async fn find_by_path(&self, _path: &str) -> Result<Option<UrlMapping>, AppError> {
        self.fail()
    }

    async fn path_exists(&self, _path: &str) -> Result<bool, AppError> {
        self.fail()
    }

    async fn insert_mapping(&self, _mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        self.fail()
    }

    async fn increment_visits(&self, _path: &str) -> Result<bool, AppError> {
        self.fail()
    }

    async fn health_check(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        false
    }
}

/// In-memory repository that fails the first `failures` lookups.
pub struct FlakyRepository {
    inner: MemoryUrlMappingRepository,
    remaining_failures: AtomicUsize,
}

impl FlakyRepository {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: MemoryUrlMappingRepository::new(),
            remaining_failures: AtomicUsize::new(failures),
        }
    }

    fn check(&self) -> Result<(), AppError> {
        let consumed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));

        match consumed {
            Ok(_) => Err(storage_down()),
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl UrlMappingRepository for FlakyRepository {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        self.inner.ensure_schema().await
    }

    async fn find_long_url_by_path(&self, path: &str) -> Result<Option<String>, AppError> {
        self.check()?;
        self.inner.find_long_url_by_path(path).await
    }

    async fn find_path_by_long_url(&self, long_url: &str) -> Result<Option<String>, AppError> {
        self.check()?;
        self.inner.find_path_by_long_url(long_url).await
    }

    async fn find_visits_by_path(&self, path: &str) -> Result<Option<i64>, AppError> {
        self.check()?;
        self.inner.find_visits_by_path(path).await
    }

    async fn find_by_path(&self, path: &str) -> Result<Option<UrlMapping>, AppError> {
        self.inner.find_by_path(path).await
    }

    async fn path_exists(&self, path: &str) -> Result<bool, AppError> {
        self.inner.path_exists(path).await
    }

    async fn insert_mapping(&self, mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        self.inner.insert_mapping(mapping).await
    }

    async fn increment_visits(&self, path: &str) -> Result<bool, AppError> {
        self.inner.increment_visits(path).await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}
