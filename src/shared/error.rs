//! Shared Error Types
//!
//! This module defines error types that are produced by the data layer shared
//! between the HTTP handlers and any client of the wire types.
//!
//! # Error Categories
//!
//! - `ValidationError` - A single field failed validation
//! - `UnknownEntityType` - An entity type name is not one of project/story/chapter
//!
//! # Usage
//!
//! ```rust
//! use storyforge::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Project title is required");
//! assert_eq!(error.field(), Some("title"));
//! ```
use serde::Serialize;
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Entity type outside the closed set of attachable entities
    #[error("Unknown entity type: {value}")]
    UnknownEntityType {
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown entity type error
    pub fn unknown_entity_type(value: impl Into<String>) -> Self {
        Self::UnknownEntityType {
            value: value.into(),
        }
    }

    /// Field name for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::UnknownEntityType { .. } => None,
        }
    }

    /// Client-facing message without the field prefix
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::UnknownEntityType { value } => format!("Invalid entity type: {}", value),
        }
    }
}

/// One field-level problem, as reported to API clients
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<SharedError> for FieldError {
    fn from(err: SharedError) -> Self {
        let message = err.user_message();
        match err {
            SharedError::ValidationError { field, .. } => Self { field, message },
            SharedError::UnknownEntityType { .. } => Self {
                field: "entityType".to_string(),
                message,
            },
        }
    }
}
