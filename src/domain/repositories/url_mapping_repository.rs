//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence gateway for URL mappings.
///
/// Implementations own storage and enforce the uniqueness of both
/// `short_url_path` and `long_url` at the storage layer. None of the operations
/// retry on their own; callers wrap them in
/// [`crate::application::backoff::BackoffPolicy`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlMappingRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Establishes the uniqueness constraints on both mapping fields.
    ///
    /// Idempotent, safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the schema cannot be applied.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    /// Finds the long URL stored under a short path.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(long_url))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_long_url_by_path(&self, short_url_path: &str)
    -> Result<Option<String>, AppError>;

    /// Finds the short path already assigned to a long URL.
    ///
    /// Used to keep shortening idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_path_by_long_url(&self, long_url: &str) -> Result<Option<String>, AppError>;

    /// Reads the visit counter of a short path, `None` if the path is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_visits_by_path(&self, short_url_path: &str) -> Result<Option<i64>, AppError>;

    /// Loads the whole mapping stored under a short path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_path(&self, short_url_path: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Returns `true` if a mapping already uses `short_url_path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn path_exists(&self, short_url_path: &str) -> Result<bool, AppError>;

    /// Inserts a new mapping with `visits = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if either the short path or the long
    /// URL is already stored; existing mappings are never overwritten.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_mapping(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Atomically adds one to the visit counter.
    ///
    /// Returns `Ok(false)` without side effects if the path does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_visits(&self, short_url_path: &str) -> Result<bool, AppError>;

    /// Checks whether the storage backend is reachable.
    async fn health_check(&self) -> bool;
}
