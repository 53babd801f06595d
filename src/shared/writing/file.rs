//! File Metadata
//!
//! One row per stored blob. `(entity_type, entity_id)` points at a project,
//! story or chapter without a foreign key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::entity::{EntityKind, EntityRef};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct FileRecord {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub entity_type: EntityKind,
    pub entity_id: Uuid,
    /// Original client-side filename
    pub filename: String,
    /// Storage key relative to the upload root
    pub file_path: String,
    pub file_size: i64,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    /// The entity this file hangs off
    pub fn owner_entity(&self) -> EntityRef {
        EntityRef::new(self.entity_type, self.entity_id)
    }
}

/// A file row joined with the uploader's username
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct FileEntry {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub file: FileRecord,
    pub uploaded_by_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// First stored file
    pub file: FileRecord,
    pub files: Vec<FileRecord>,
}
