//! Handler for visit counters.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::VisitsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns how many times a short path has been followed.
///
/// # Endpoint
///
/// `GET /count/{short_url_path}`
///
/// # Response
///
/// ```json
/// { "visits": 3 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the short path doesn't exist.
pub async fn visits_handler(
    Path(short_url_path): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<VisitsResponse>, AppError> {
    let path = short_url_path.as_str();
    let shortener = state.shortener.as_ref();

    let visits = state
        .backoff
        .run(move || shortener.get_visit_count(path))
        .await?;

    Ok(Json(VisitsResponse { visits }))
}
