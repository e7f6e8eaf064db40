//! Short path generation utilities.
//!
//! Short paths are fixed-length random strings over the 62-symbol
//! alphanumeric alphabet.

use rand::Rng;

/// Alphabet of generated short paths: `A-Z`, `a-z`, `0-9`.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of generated short paths.
pub const DEFAULT_PATH_LENGTH: usize = 5;

/// Route segments that must never be handed out as short paths.
pub const RESERVED_PATHS: &[&str] = &["count", "get_long_url", "generate_short_url", "health"];

/// Draws a random short path of `length` alphanumeric characters.
///
/// Uniqueness is not checked here; see
/// [`crate::application::services::ShortenerService`].
///
/// # Examples
///
/// ```ignore
/// let path = generate_short_path(5);
/// assert_eq!(path.len(), 5);
/// assert!(path.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_short_path(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns `true` if `path` collides with a fixed route.
pub fn is_reserved_path(path: &str) -> bool {
    RESERVED_PATHS.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_charset_has_62_symbols() {
        let unique: HashSet<_> = CHARSET.iter().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_short_path_default_length() {
        let path = generate_short_path(DEFAULT_PATH_LENGTH);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_generate_short_path_custom_length() {
        for length in [1, 8, 32] {
            assert_eq!(generate_short_path(length).len(), length);
        }
    }

    #[test]
    fn test_generate_short_path_alphanumeric_only() {
        for _ in 0..500 {
            let path = generate_short_path(DEFAULT_PATH_LENGTH);
            assert!(path.chars().all(|c| c.is_ascii_alphanumeric()), "{path}");
        }
    }

    #[test]
    fn test_generate_short_path_varies() {
        let paths: HashSet<String> = (0..1000)
            .map(|_| generate_short_path(DEFAULT_PATH_LENGTH))
            .collect();

        // 62^5 combinations make a handful of collisions in 1000 draws very unlikely.
        assert!(paths.len() > 990);
    }

    #[test]
    fn test_reserved_paths() {
        assert!(is_reserved_path("count"));
        assert!(is_reserved_path("health"));
        assert!(!is_reserved_path("abc12"));
        assert!(!is_reserved_path("Count"));
    }
}
