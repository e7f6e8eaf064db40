//! URL mapping entity: the association between a short path and its long URL.

use std::fmt;

/// A persisted short path → long URL mapping with its visit counter.
///
/// Both `short_url_path` and `long_url` are unique across all mappings. A
/// mapping never changes after creation except for `visits`, which only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_url_path: String,
    pub long_url: String,
    pub visits: i64,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(short_url_path: String, long_url: String, visits: i64) -> Self {
        Self {
            short_url_path,
            long_url,
            visits,
        }
    }
}

/// Input data for creating a new mapping. Visits always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_url_path: String,
    pub long_url: String,
}

impl NewUrlMapping {
    pub fn new(short_url_path: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_url_path: short_url_path.into(),
            long_url: long_url.into(),
        }
    }
}

/// A uniquely-constrained field of [`UrlMapping`].
///
/// Carried by [`crate::error::AppError::DuplicateKey`] so callers can tell a
/// short path collision from a concurrent shortening of the same long URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingField {
    ShortUrlPath,
    LongUrl,
}

impl MappingField {
    /// Storage column name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortUrlPath => "short_url_path",
            Self::LongUrl => "long_url",
        }
    }
}

impl fmt::Display for MappingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
