/**
 * Error Conversion
 *
 * Converts backend errors and extractor rejections into HTTP responses.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "Validation failed",
 *   "errors": [{ "field": "title", "message": "Project title is required" }]
 * }
 * ```
 *
 * `errors` is only present for validation and upload failures.
 */

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::{BackendError, INTERNAL_ERROR_MESSAGE};
use crate::shared::FieldError;

impl IntoResponse for BackendError {
    /// Convert a backend error into a JSON response.
    ///
    /// Server-side failures are logged here with their cause; the client
    /// only ever sees the generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = match &self {
            BackendError::Validation { message, errors } => json!({
                "message": message,
                "errors": errors,
            }),
            BackendError::UploadRejected(errors) => json!({
                "message": self.message(),
                "errors": errors.iter().map(|e| e.to_json()).collect::<Vec<_>>(),
            }),
            _ => json!({ "message": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::Validation {
            message: "Invalid request body".to_string(),
            errors: vec![FieldError::new("body", rejection.body_text())],
        }
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        BackendError::validation("file", rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            BackendError::validation("file", "Upload exceeds the maximum request size")
        } else {
            BackendError::validation("file", format!("Invalid multipart body: {}", err.body_text()))
        }
    }
}

/// Body for panics caught by the panic layer
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}
