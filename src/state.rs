//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::backoff::BackoffPolicy;
use crate::application::services::{DynShortenerService, ShortenerService, ShortenerSettings};
use crate::domain::repositories::UrlMappingRepository;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<DynShortenerService>,
    /// Used directly only by the health check.
    pub repository: Arc<dyn UrlMappingRepository>,
    pub backoff: BackoffPolicy,
}

impl AppState {
    /// Wires the shortener service on top of `repository`.
    pub fn new(
        repository: Arc<dyn UrlMappingRepository>,
        settings: ShortenerSettings,
        backoff: BackoffPolicy,
    ) -> Self {
        let shortener = Arc::new(ShortenerService::new(repository.clone(), settings));

        Self {
            shortener,
            repository,
            backoff,
        }
    }
}
