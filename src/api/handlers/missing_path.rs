//! Handler for routes that require a short path but were called without one.

use serde_json::json;

use crate::error::AppError;

/// Rejects `GET /`, `GET /count` and `GET /get_long_url`.
pub async fn missing_path_handler() -> AppError {
    AppError::bad_request(
        "short url path was not provided",
        json!({ "field": "short_url_path" }),
    )
}
