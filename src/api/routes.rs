//! API route configuration.

use crate::api::handlers::{
    generate_short_url_handler, health_handler, long_url_handler, missing_path_handler,
    redirect_handler, visits_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /generate_short_url`              - Create or reuse a short URL
/// - `GET  /{short_url_path}`                - Redirect to the long URL
/// - `GET  /get_long_url/{short_url_path}`   - Look up the long URL
/// - `GET  /count/{short_url_path}`          - Visit counter
/// - `GET  /health`                          - Storage health
/// - `GET  /`, `/count`, `/get_long_url`     - Rejected: short path missing
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/generate_short_url", post(generate_short_url_handler))
        .route("/health", get(health_handler))
        .route("/get_long_url/{short_url_path}", get(long_url_handler))
        .route("/count/{short_url_path}", get(visits_handler))
        .route("/{short_url_path}", get(redirect_handler))
        .route("/", get(missing_path_handler))
        .route("/count", get(missing_path_handler))
        .route("/get_long_url", get(missing_path_handler))
}
