/**
 * File HTTP Handlers
 *
 * - `POST /api/files/upload/{entity_type}/{entity_id}` - multipart upload
 * - `GET /api/files/entity/{entity_type}/{entity_id}` - list attached files
 * - `GET /api/files/{id}` - download as an attachment
 * - `DELETE /api/files/{id}` - delete row and blob
 *
 * `entity_type` is the plural resource name (`projects`, `stories`,
 * `chapters`). Files of entities the caller does not own answer 404.
 */

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::extract::{parse_entity, parse_id};
use crate::backend::files::db;
use crate::backend::files::pipeline;
use crate::backend::files::storage::BlobStore;
use crate::backend::files::validation::content_type_for_extension;
use crate::backend::middleware::AuthUser;
use crate::backend::ownership::{authorize_file, require_owner};
use crate::shared::entity::EntityRef;
use crate::shared::writing::{FileListResponse, MessageResponse, UploadResponse};

/// Upload up to five files to a project, story or chapter
pub async fn upload_files(
    State(pool): State<SqlitePool>,
    State(store): State<BlobStore>,
    AuthUser(user): AuthUser,
    Path((entity_type, entity_id)): Path<(String, String)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), BackendError> {
    let (kind, id) = parse_entity(&entity_type, &entity_id)?;
    let entity = EntityRef::new(kind, id);

    // Ownership first, so nobody else's upload ever reaches the disk.
    require_owner(&pool, user.user_id, entity).await?;

    let incoming = pipeline::receive(multipart?).await?;
    let records = pipeline::upload(&pool, &store, entity, user.user_id, incoming).await?;

    let message = if records.len() == 1 {
        "File uploaded successfully".to_string()
    } else {
        format!("{} files uploaded successfully", records.len())
    };
    let first = records
        .first()
        .cloned()
        .ok_or_else(|| BackendError::internal("upload produced no records"))?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message,
            file: first,
            files: records,
        }),
    ))
}

/// List the files attached to an entity, newest first
pub async fn list_entity_files(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((entity_type, entity_id)): Path<(String, String)>,
) -> Result<Json<FileListResponse>, BackendError> {
    let (kind, id) = parse_entity(&entity_type, &entity_id)?;
    let entity = EntityRef::new(kind, id);

    require_owner(&pool, user.user_id, entity).await?;
    let files = db::list_files_for_entity(&pool, entity).await?;

    Ok(Json(FileListResponse { files }))
}

/// Stream a stored file back as an attachment
pub async fn download_file(
    State(pool): State<SqlitePool>,
    State(store): State<BlobStore>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Response, BackendError> {
    let file_id = parse_id(&id, "File")?;
    let file = authorize_file(&pool, user.user_id, file_id).await?;

    let bytes = match store.read(&file.file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("File {} missing on disk at {}", file.id, file.file_path);
            return Err(BackendError::not_found("File not found"));
        }
        Err(e) => return Err(e.into()),
    };

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type_for_extension(&file.filename)),
        ),
        (header::CONTENT_DISPOSITION, content_disposition(&file.filename)?),
    ];

    Ok((headers, Body::from(bytes)).into_response())
}

/// Delete a file row, then its blob
pub async fn delete_file(
    State(pool): State<SqlitePool>,
    State(store): State<BlobStore>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let file_id = parse_id(&id, "File")?;
    let file = authorize_file(&pool, user.user_id, file_id).await?;

    if !db::delete_file(&pool, file.id).await? {
        return Err(BackendError::not_found("File not found"));
    }
    store.remove_best_effort(&file.file_path).await;

    tracing::info!("File {} deleted by user {}", file.id, user.user_id);
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// `attachment` disposition with an ASCII fallback name and an RFC 5987
/// encoded original
fn content_disposition(filename: &str) -> Result<HeaderValue, BackendError> {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut value = format!("attachment; filename=\"{}\"", fallback);
    if fallback != filename {
        value.push_str("; filename*=UTF-8''");
        for byte in filename.bytes() {
            if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
                value.push(byte as char);
            } else {
                value.push_str(&format!("%{:02X}", byte));
            }
        }
    }

    HeaderValue::from_str(&value)
        .map_err(|e| BackendError::internal(format!("bad Content-Disposition: {}", e)))
}
