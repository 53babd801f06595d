/**
 * Upload Pipeline
 *
 * Each upload request moves through four stages:
 *
 * ```text
 * Received ──validate──▶ Validated ──write──▶ Stored ──insert──▶ Recorded
 * ```
 *
 * Every file is validated before anything touches the disk, and all
 * rejections are reported together. If a later stage fails, every blob this
 * request already wrote is removed before the error is returned.
 */

use axum::extract::Multipart;
use bytes::Bytes;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::files::db::insert_files;
use crate::backend::files::storage::BlobStore;
use crate::backend::files::validation::{self, FileCategory, MAX_FILES_PER_REQUEST};
use crate::shared::entity::{EntityKind, EntityRef};
use crate::shared::writing::FileRecord;

/// Multipart field that carries files
pub const FILE_FIELD: &str = "file";

/// A file as it arrived in the request
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// A file that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedFile {
    pub filename: String,
    pub category: FileCategory,
    pub bytes: Bytes,
}

/// A file written to blob storage
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    /// Relative storage path
    pub file_path: String,
    pub size: i64,
}

/// Collect the `file` parts of a multipart body
pub async fn receive(mut multipart: Multipart) -> Result<Vec<IncomingFile>, BackendError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if files.len() == MAX_FILES_PER_REQUEST {
            return Err(too_many_files());
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;

        files.push(IncomingFile {
            filename,
            content_type,
            bytes,
        });
    }

    Ok(files)
}

fn too_many_files() -> BackendError {
    BackendError::validation(
        "file",
        format!("A maximum of {} files can be uploaded at once", MAX_FILES_PER_REQUEST),
    )
}

/// Validate a whole batch, reporting every rejected file
pub fn validate_batch(files: Vec<IncomingFile>) -> Result<Vec<ValidatedFile>, BackendError> {
    if files.is_empty() {
        return Err(BackendError::validation("file", "No file uploaded"));
    }
    if files.len() > MAX_FILES_PER_REQUEST {
        return Err(too_many_files());
    }

    let mut validated = Vec::with_capacity(files.len());
    let mut errors = Vec::new();

    for file in files {
        match validation::validate(&file.filename, &file.content_type, file.bytes.len() as u64) {
            Ok(category) => validated.push(ValidatedFile {
                filename: file.filename,
                category,
                bytes: file.bytes,
            }),
            Err(e) => {
                tracing::warn!("Upload rejected ({}): {}", e.code(), e);
                errors.push(e);
            }
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(BackendError::UploadRejected(errors))
    }
}

/// Write every validated file; on failure nothing from this batch remains
pub async fn store_batch(
    store: &BlobStore,
    kind: EntityKind,
    files: Vec<ValidatedFile>,
) -> Result<Vec<StoredFile>, BackendError> {
    let mut stored = Vec::with_capacity(files.len());

    for file in files {
        match store.put(kind, &file.filename, &file.bytes).await {
            Ok(file_path) => stored.push(StoredFile {
                filename: file.filename,
                file_path,
                size: file.bytes.len() as i64,
            }),
            Err(e) => {
                tracing::error!("Failed to store upload {}: {}", file.filename, e);
                discard(store, &stored).await;
                return Err(e.into());
            }
        }
    }

    Ok(stored)
}

async fn discard(store: &BlobStore, stored: &[StoredFile]) {
    for file in stored {
        store.remove_best_effort(&file.file_path).await;
    }
}

/// Run a batch of files through the whole pipeline.
///
/// Callers check that `uploaded_by` owns `entity` before reading the body.
/// The check is repeated when the rows are inserted, so an entity deleted
/// mid-upload leaves neither rows nor blobs behind.
pub async fn upload(
    pool: &SqlitePool,
    store: &BlobStore,
    entity: EntityRef,
    uploaded_by: Uuid,
    files: Vec<IncomingFile>,
) -> Result<Vec<FileRecord>, BackendError> {
    let validated = validate_batch(files)?;
    let stored = store_batch(store, entity.kind(), validated).await?;

    match insert_files(pool, entity, uploaded_by, &stored).await {
        Ok(Some(records)) => {
            tracing::info!("Stored {} file(s) for {}", records.len(), entity);
            Ok(records)
        }
        Ok(None) => {
            tracing::warn!("{} disappeared during upload by {}", entity, uploaded_by);
            discard(store, &stored).await;
            Err(BackendError::not_found(format!("{} not found", entity.kind().label())))
        }
        Err(e) => {
            discard(store, &stored).await;
            Err(e.into())
        }
    }
}
