//! Shared Module
//!
//! This module contains types and data structures used by the HTTP layer and
//! by any client of the JSON API. They carry no server dependencies beyond
//! serde and the sqlx row derive.
//!
//! # Overview
//!
//! - **`entity`** - The closed set of file-owning entity kinds and references
//! - **`writing`** - Users, projects, stories, chapters and file metadata
//! - **`validation`** - Field rules shared by every create/update
//! - **`error`** - Shared error types

/// Entity kinds and references
pub mod entity;

/// Shared error types
pub mod error;

/// Field validation rules
pub mod validation;

/// Writing data model
pub mod writing;

pub use entity::{EntityKind, EntityRef};
pub use error::{FieldError, SharedError};
