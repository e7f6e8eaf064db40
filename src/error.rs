//! Application error type and its HTTP representation.
//!
//! Errors are classified at the service boundary: [`AppError::Validation`],
//! [`AppError::NotFound`] and [`AppError::DuplicateKey`] are terminal and never
//! retried, while [`AppError::Internal`] marks a transient failure that
//! [`crate::application::backoff::BackoffPolicy`] may retry.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::entities::MappingField;

/// Message returned to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized error payload: `{"code", "message", "details"}`.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("Duplicate value for unique field `{field}`")]
    DuplicateKey { field: MappingField },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate_key(field: MappingField) -> Self {
        Self::DuplicateKey { field }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns `true` for failures worth retrying with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Converts the error into its client-facing payload.
    ///
    /// Internal errors are reduced to a generic message; their cause is only
    /// logged.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            Self::DuplicateKey { field } => ErrorInfo {
                code: "conflict",
                message: self.to_string(),
                details: json!({ "field": field.as_str() }),
            },
            Self::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                details: json!({}),
            },
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // Unknown short paths are reported as 400, not 404.
            Self::Validation { .. } | Self::NotFound { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateKey { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, details } = &self {
            tracing::error!(%message, %details, "Request failed with internal error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps storage errors onto the application taxonomy.
///
/// Unique violations become [`AppError::DuplicateKey`], keyed by the violated
/// constraint; everything else is treated as transient.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let field = match db.constraint() {
            Some("url_mappings_long_url_key") => MappingField::LongUrl,
            _ => MappingField::ShortUrlPath,
        };
        return AppError::duplicate_key(field);
    }

    AppError::internal(format!("Database error: {e}"), json!({}))
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut items: Vec<Value> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    json!({ "field": field.to_string(), "message": message })
                })
            })
            .collect();

        items.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));

        AppError::bad_request("Request validation failed", json!({ "errors": items }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON data in the request body.",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
