//! In-memory implementation of the URL mapping repository.
//!
//! Keeps every mapping in RAM with the same uniqueness guarantees as the
//! PostgreSQL backend. Nothing survives a restart, so this backend is meant
//! for tests and local development (`STORAGE_BACKEND=memory`).

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::entities::{MappingField, NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    by_path: HashMap<String, UrlMapping>,
    path_by_long_url: HashMap<String, String>,
}

/// Thread-safe in-process mapping store.
///
/// Both indexes are updated under a single write lock, so an insert either
/// claims the short path and the long URL together or fails with
/// [`AppError::DuplicateKey`].
#[derive(Debug, Default)]
pub struct MemoryUrlMappingRepository {
    tables: RwLock<Tables>,
}

impl MemoryUrlMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.tables.read().by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UrlMappingRepository for MemoryUrlMappingRepository {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_long_url_by_path(
        &self,
        short_url_path: &str,
    ) -> Result<Option<String>, AppError> {
        let tables = self.tables.read();
        Ok(tables
            .by_path
            .get(short_url_path)
            .map(|m| m.long_url.clone()))
    }

    async fn find_path_by_long_url(&self, long_url: &str) -> Result<Option<String>, AppError> {
        let tables = self.tables.read();
        Ok(tables.path_by_long_url.get(long_url).cloned())
    }

    async fn find_visits_by_path(&self, short_url_path: &str) -> Result<Option<i64>, AppError> {
        let tables = self.tables.read();
        Ok(tables.by_path.get(short_url_path).map(|m| m.visits))
    }

    async fn find_by_path(&self, short_url_path: &str) -> Result<Option<UrlMapping>, AppError> {
        let tables = self.tables.read();
        Ok(tables.by_path.get(short_url_path).cloned())
    }

    async fn path_exists(&self, short_url_path: &str) -> Result<bool, AppError> {
        let tables = self.tables.read();
        Ok(tables.by_path.contains_key(short_url_path))
    }

    async fn insert_mapping(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut tables = self.tables.write();

        if tables.by_path.contains_key(&new_mapping.short_url_path) {
            return Err(AppError::duplicate_key(MappingField::ShortUrlPath));
        }
        if tables.path_by_long_url.contains_key(&new_mapping.long_url) {
            return Err(AppError::duplicate_key(MappingField::LongUrl));
        }

        let mapping = UrlMapping::new(new_mapping.short_url_path, new_mapping.long_url, 0);
        tables
            .path_by_long_url
            .insert(mapping.long_url.clone(), mapping.short_url_path.clone());
        tables
            .by_path
            .insert(mapping.short_url_path.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn increment_visits(&self, short_url_path: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write();
        match tables.by_path.get_mut(short_url_path) {
            Some(mapping) => {
                mapping.visits += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
