/**
 * Backend Error Types
 *
 * This module defines the single error type returned by every HTTP handler.
 * Each variant maps onto one HTTP status code.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` (400) - missing or malformed fields, with field-level detail
 * - `Authentication` (401) - missing, invalid or expired bearer token, bad credentials
 * - `NotFound` (404) - missing row, or a row the requester does not own
 * - `Conflict` (400) - duplicate username or email
 * - `UploadRejected` (400) - one or more uploaded files failed validation
 *
 * ## Server Errors
 *
 * Database, storage, token-signing and hashing failures all answer
 * 500 `{"message": "Internal server error"}`. The cause is logged, never sent.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::files::validation::UploadError;
use crate::shared::{FieldError, SharedError};

/// Message sent to clients for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use storyforge::backend::error::BackendError;
///
/// let err = BackendError::not_found("Story not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request failed field validation
    #[error("Validation failed: {message}")]
    Validation {
        /// Summary message
        message: String,
        /// Per-field detail
        errors: Vec<FieldError>,
    },

    /// Missing, invalid or expired credentials
    #[error("Authentication error: {message}")]
    Authentication {
        /// Human-readable error message
        message: String,
    },

    /// Row missing or not owned by the requester
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Uniqueness violation the client can fix
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Uploaded files rejected by type, extension, name or size checks
    #[error("Upload rejected: {} file(s) failed validation", .0.len())]
    UploadRejected(Vec<UploadError>),

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Blob storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Anything else that is the server's fault
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Validation {
            errors: vec![FieldError::new(field, message.clone())],
            message,
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `Conflict`, `UploadRejected` - 400 Bad Request
    /// - `Authentication` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Conflict { .. } | Self::UploadRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_)
            | Self::Storage(_)
            | Self::Token(_)
            | Self::Hash(_)
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is the server's fault
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Authentication { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::UploadRejected(errors) => match errors.as_slice() {
                [single] => single.to_string(),
                _ => format!("{} files were rejected", errors.len()),
            },
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        let message = err.user_message();
        Self::Validation {
            message,
            errors: vec![FieldError::from(err)],
        }
    }
}
