//! API error types with IntoResponse
//!
//! Errors are converted to JSON `{error, message}` bodies with matching
//! status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body could not be read as the expected JSON (400/415/422)
    MalformedBody { status: StatusCode, message: String },

    /// No row with this id (404)
    NotFound { resource: &'static str, id: i32 },

    /// Unique constraint violated (409)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }
}

/// Not-found message shared by every lookup
pub fn missing_message(resource: &str, id: i32) -> String {
    format!("{} with id {} does not exist", resource, id)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::MalformedBody { status, message } => (
                *status,
                json!({
                    "error": "malformed_request",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": missing_message(resource, *id)
                }),
            ),
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": message
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict(message) => Self::Conflict { message },
            _ => Self::Database(e),
        }
    }
}
