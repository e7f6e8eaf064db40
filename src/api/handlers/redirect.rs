//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short path to its long URL.
///
/// # Endpoint
///
/// `GET /{short_url_path}`
///
/// # Request Flow
///
/// 1. Look up the long URL
/// 2. Increment the visit counter (best-effort)
/// 3. Return 302 Found with a `Location` header
///
/// # Errors
///
/// Returns 400 Bad Request if the short path doesn't exist.
pub async fn redirect_handler(
    Path(short_url_path): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let path = short_url_path.as_str();
    let shortener = state.shortener.as_ref();

    let long_url = state
        .backoff
        .run(move || shortener.resolve_and_redirect(path))
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}
