//! Handler for long URL lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::LongUrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the long URL behind a short path without counting a visit.
///
/// # Endpoint
///
/// `GET /get_long_url/{short_url_path}`
///
/// # Errors
///
/// Returns 400 Bad Request if the short path doesn't exist.
pub async fn long_url_handler(
    Path(short_url_path): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LongUrlResponse>, AppError> {
    let path = short_url_path.as_str();
    let shortener = state.shortener.as_ref();

    let long_url = state
        .backoff
        .run(move || shortener.get_long_url(path))
        .await?;

    Ok(Json(LongUrlResponse { long_url }))
}
