// ABOUTME: API error type mapping validation, not-found, and storage failures to HTTP responses.
// ABOUTME: Response bodies use a {"detail": ...} envelope; 422 details list each offending field.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brewlog_core::{FieldError, Location, ValidationError};
use brewlog_store::StoreError;
use serde_json::{Value, json};

pub const NOT_FOUND_DETAIL: &str = "Brew not found";

/// Errors returned by brew handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("brew not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Whole-body rejection: unparsable JSON, wrong content type, or wrong field types.
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::single(FieldError::invalid(
            Location::Body,
            "",
            rejection.body_text(),
        )))
    }

    pub fn from_query_rejection(rejection: QueryRejection) -> Self {
        Self::Validation(ValidationError::single(FieldError::invalid(
            Location::Query,
            "",
            rejection.body_text(),
        )))
    }

    pub fn from_path_rejection(param: &str, rejection: PathRejection) -> Self {
        Self::Validation(ValidationError::single(FieldError::invalid(
            Location::Path,
            param,
            rejection.body_text(),
        )))
    }
}

fn field_detail(error: &FieldError) -> Value {
    let mut loc = vec![json!(error.location)];
    if !error.field.is_empty() {
        loc.push(json!(error.field));
    }
    json!({
        "loc": loc,
        "msg": error.message,
        "type": error.kind,
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "detail": e.errors.iter().map(field_detail).collect::<Vec<_>>() }),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, json!({ "detail": NOT_FOUND_DETAIL })),
            Self::Storage(e) => {
                tracing::error!("storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error" }),
                )
            }
            Self::Internal(message) => {
                tracing::error!("internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
