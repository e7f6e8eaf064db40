//! DTOs for short URL endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body of `POST /generate_short_url`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateShortUrlRequest {
    /// The URL to shorten (must be a valid HTTP/HTTPS URL).
    #[validate(
        required(message = "long_url is required"),
        url(message = "Invalid URL format")
    )]
    pub long_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateShortUrlResponse {
    pub short_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LongUrlResponse {
    pub long_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisitsResponse {
    pub visits: i64,
}
