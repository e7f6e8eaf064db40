//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod health;
pub mod short_url;

pub use short_url::{
    GenerateShortUrlRequest, GenerateShortUrlResponse, LongUrlResponse, VisitsResponse,
};
