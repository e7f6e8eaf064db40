//! Short URL generation, resolution and visit counting.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{MappingField, NewUrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use crate::utils::path_generator::{DEFAULT_PATH_LENGTH, generate_short_path, is_reserved_path};
use crate::utils::url_validator::validate_long_url;

/// Public address of generated short URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenerSettings {
    /// Protocol of generated short URLs, e.g. `https`.
    pub protocol: String,
    /// Domain serving short URLs, e.g. `svc.test`.
    pub domain: String,
    /// Length of generated short paths.
    pub path_length: usize,
}

impl ShortenerSettings {
    pub fn new(protocol: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            domain: domain.into(),
            path_length: DEFAULT_PATH_LENGTH,
        }
    }

    pub fn with_path_length(mut self, path_length: usize) -> Self {
        self.path_length = path_length;
        self
    }
}

/// Service type used by the HTTP layer, independent of the storage backend.
pub type DynShortenerService = ShortenerService<dyn UrlMappingRepository>;

/// Service for creating and resolving short URLs.
///
/// Holds no locks: uniqueness of short paths and long URLs is enforced by the
/// repository, and storage-level duplicate rejections are handled here as a
/// routine outcome of concurrent shortening.
pub struct ShortenerService<R: UrlMappingRepository + ?Sized> {
    repository: Arc<R>,
    settings: ShortenerSettings,
}

impl<R: UrlMappingRepository + ?Sized> ShortenerService<R> {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<R>, settings: ShortenerSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    /// Returns the fully-qualified short URL for a long URL, creating the
    /// mapping on first use.
    ///
    /// # Deduplication
    ///
    /// A long URL is mapped at most once. Repeated calls, including concurrent
    /// ones that race on the insert, return the same short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is empty or not an
    /// HTTP(S) URL; storage is not touched in that case.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn generate_short_url(&self, long_url: &str) -> Result<String, AppError> {
        validate_long_url(long_url).map_err(|e| {
            AppError::bad_request(
                "Invalid long_url",
                json!({ "errors": [{ "field": "long_url", "message": e.to_string() }] }),
            )
        })?;

        if let Some(existing_path) = self.repository.find_path_by_long_url(long_url).await? {
            debug!(short_url_path = %existing_path, "Long URL already shortened");
            return Ok(self.full_short_url(&existing_path));
        }

        let short_url_path = self.insert_with_unique_path(long_url).await?;
        Ok(self.full_short_url(&short_url_path))
    }

    /// Resolves a short path for a redirect and counts the visit.
    ///
    /// The counter is incremented before returning, but counting is
    /// best-effort: an increment failure is logged and the long URL is still
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the path is empty.
    /// Returns [`AppError::NotFound`] if no mapping uses the path.
    /// Returns [`AppError::Internal`] if the lookup fails.
    pub async fn resolve_and_redirect(&self, short_url_path: &str) -> Result<String, AppError> {
        let long_url = self.get_long_url(short_url_path).await?;

        match self.repository.increment_visits(short_url_path).await {
            Ok(true) => {}
            Ok(false) => warn!(%short_url_path, "Mapping disappeared before visit was counted"),
            Err(e) => warn!(%short_url_path, error = %e, "Failed to count visit"),
        }

        Ok(long_url)
    }

    /// Returns the long URL behind a short path without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the path is empty.
    /// Returns [`AppError::NotFound`] if no mapping uses the path.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_long_url(&self, short_url_path: &str) -> Result<String, AppError> {
        ensure_path_present(short_url_path)?;

        self.repository
            .find_long_url_by_path(short_url_path)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Short URL path was not found",
                    json!({ "short_url_path": short_url_path }),
                )
            })
    }

    /// Returns the visit counter of a short path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the path is empty.
    /// Returns [`AppError::NotFound`] if no mapping uses the path.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_visit_count(&self, short_url_path: &str) -> Result<i64, AppError> {
        ensure_path_present(short_url_path)?;

        self.repository
            .find_visits_by_path(short_url_path)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Short URL path was not found",
                    json!({ "short_url_path": short_url_path }),
                )
            })
    }

    /// Builds `protocol://domain/path`.
    pub fn full_short_url(&self, short_url_path: &str) -> String {
        format!(
            "{}://{}/{}",
            self.settings.protocol,
            self.settings.domain.trim_end_matches('/'),
            short_url_path
        )
    }

    /// Draws paths until one is stored for `long_url`.
    ///
    /// Rejection sampling without an attempt limit: a draw is discarded when it
    /// is reserved, already stored, or loses an insert race to a concurrent
    /// request. If a concurrent request stored the same long URL first, its path
    /// is returned instead.
    async fn insert_with_unique_path(&self, long_url: &str) -> Result<String, AppError> {
        loop {
            let candidate = self.next_free_path().await?;

            match self
                .repository
                .insert_mapping(NewUrlMapping::new(candidate, long_url))
                .await
            {
                Ok(mapping) => {
                    info!(short_url_path = %mapping.short_url_path, "Created short URL mapping");
                    return Ok(mapping.short_url_path);
                }
                Err(AppError::DuplicateKey {
                    field: MappingField::ShortUrlPath,
                }) => {
                    debug!("Short path taken by a concurrent insert, drawing again");
                }
                Err(AppError::DuplicateKey {
                    field: MappingField::LongUrl,
                }) => {
                    if let Some(path) = self.repository.find_path_by_long_url(long_url).await? {
                        return Ok(path);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Draws a path that is neither reserved nor currently stored.
    async fn next_free_path(&self) -> Result<String, AppError> {
        loop {
            let candidate = generate_short_path(self.settings.path_length);

            if is_reserved_path(&candidate) {
                continue;
            }

            if !self.repository.path_exists(&candidate).await? {
                return Ok(candidate);
            }

            debug!(short_url_path = %candidate, "Short path collision, drawing again");
        }
    }
}

fn ensure_path_present(short_url_path: &str) -> Result<(), AppError> {
    if short_url_path.is_empty() {
        return Err(AppError::bad_request(
            "short url path was not provided",
            json!({ "field": "short_url_path" }),
        ));
    }
    Ok(())
}
