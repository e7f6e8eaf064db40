//! Handler for short URL generation.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::{GenerateShortUrlRequest, GenerateShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short URL for a long URL, creating the mapping on first use.
///
/// # Endpoint
///
/// `POST /generate_short_url`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "https://svc.test/aB3xZ" }
/// ```
///
/// Submitting the same long URL again returns the same short URL.
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON or a missing/invalid `long_url`.
/// Returns 500 Internal Server Error when storage stays unavailable after
/// retrying.
pub async fn generate_short_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateShortUrlRequest>, JsonRejection>,
) -> Result<Json<GenerateShortUrlResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let requested = payload.long_url.ok_or_else(|| {
        AppError::bad_request("long_url is required", json!({ "field": "long_url" }))
    })?;
    let long_url = requested.as_str();
    let shortener = state.shortener.as_ref();

    let short_url = state
        .backoff
        .run(move || shortener.generate_short_url(long_url))
        .await?;

    Ok(Json(GenerateShortUrlResponse { short_url }))
}
