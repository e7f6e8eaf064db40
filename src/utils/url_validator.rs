//! Long URL validation.
//!
//! URLs are validated but stored exactly as submitted, so shortening stays
//! idempotent on the literal string.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("long_url must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must not contain whitespace or control characters")]
    InvalidCharacters,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `input` is a non-empty absolute HTTP(S) URL with a host.
///
/// The URL parser silently drops tabs and newlines and trims surrounding
/// spaces, so such characters are rejected up front: the stored string must
/// be exactly what a `Location` header can carry.
///
/// # Security
///
/// Rejects schemes such as `javascript:`, `data:` or `file:` so redirects can
/// only lead to web pages.
///
/// # Errors
///
/// See [`UrlValidationError`].
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::InvalidCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
