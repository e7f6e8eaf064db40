//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers; [`backoff`] supplies the retry policy handlers apply around them.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Short URL creation, resolution and visit counting
//! - [`backoff::BackoffPolicy`] - Exponential backoff for transient failures

pub mod backoff;
pub mod services;
