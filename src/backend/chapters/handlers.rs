/**
 * Chapter HTTP Handlers
 *
 * - `GET|POST /api/chapters/stories/{story_id}/chapters` - list, create
 * - `GET|PUT|DELETE /api/chapters/{id}` - read, replace, delete
 *
 * Content is rich HTML, limited to 65,535 bytes. Concurrent edits of the
 * same chapter are not detected: the last PUT wins.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::backend::chapters::db;
use crate::backend::error::BackendError;
use crate::backend::extract::{parse_id, ApiJson};
use crate::backend::files::storage::BlobStore;
use crate::backend::middleware::AuthUser;
use crate::backend::ownership::require_owner;
use crate::backend::tree::delete_subtree;
use crate::shared::entity::EntityRef;
use crate::shared::validation::{validate_chapter_content, validate_title};
use crate::shared::writing::{
    ChapterInput, ChapterListResponse, ChapterResponse, MessageResponse,
};
use crate::shared::FieldError;

fn not_found() -> BackendError {
    BackendError::not_found("Chapter not found")
}

/// Check title and content together so both problems are reported at once
fn validate_input(input: ChapterInput) -> Result<(String, String), BackendError> {
    let content = input.content.unwrap_or_default();
    let mut errors = Vec::new();

    let title = validate_title("Chapter", input.title.as_deref().unwrap_or_default())
        .map_err(|e| errors.push(FieldError::from(e)))
        .ok();
    if let Err(e) = validate_chapter_content(&content) {
        errors.push(FieldError::from(e));
    }

    match title {
        Some(title) if errors.is_empty() => Ok((title, content)),
        _ => Err(BackendError::Validation {
            message: "Validation failed".to_string(),
            errors,
        }),
    }
}

pub async fn list_chapters(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(story_id): Path<String>,
) -> Result<Json<ChapterListResponse>, BackendError> {
    let story_id = parse_id(&story_id, "Story")?;
    require_owner(&pool, user.user_id, EntityRef::Story(story_id)).await?;

    let chapters = db::list_chapters(&pool, story_id).await?;
    Ok(Json(ChapterListResponse { chapters }))
}

pub async fn get_chapter(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ChapterResponse>, BackendError> {
    let id = parse_id(&id, "Chapter")?;
    require_owner(&pool, user.user_id, EntityRef::Chapter(id)).await?;

    let chapter = db::get_chapter(&pool, id).await?.ok_or_else(not_found)?;
    Ok(Json(ChapterResponse {
        message: None,
        chapter,
    }))
}

pub async fn create_chapter(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(story_id): Path<String>,
    ApiJson(input): ApiJson<ChapterInput>,
) -> Result<(StatusCode, Json<ChapterResponse>), BackendError> {
    let story_id = parse_id(&story_id, "Story")?;
    require_owner(&pool, user.user_id, EntityRef::Story(story_id)).await?;

    let (title, content) = validate_input(input)?;
    let chapter = db::create_chapter(&pool, story_id, &title, &content).await?;
    tracing::info!(
        "Chapter {} created in story {} at position {}",
        chapter.id,
        story_id,
        chapter.order_index
    );

    Ok((
        StatusCode::CREATED,
        Json(ChapterResponse {
            message: Some("Chapter created successfully".to_string()),
            chapter,
        }),
    ))
}

pub async fn update_chapter(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ChapterInput>,
) -> Result<Json<ChapterResponse>, BackendError> {
    let id = parse_id(&id, "Chapter")?;
    require_owner(&pool, user.user_id, EntityRef::Chapter(id)).await?;

    let (title, content) = validate_input(input)?;
    let chapter = db::update_chapter(&pool, id, &title, &content)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ChapterResponse {
        message: Some("Chapter updated successfully".to_string()),
        chapter,
    }))
}

/// Delete a chapter and its files
pub async fn delete_chapter(
    State(pool): State<SqlitePool>,
    State(store): State<BlobStore>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let id = parse_id(&id, "Chapter")?;
    let entity = EntityRef::Chapter(id);
    require_owner(&pool, user.user_id, entity).await?;

    if !delete_subtree(&pool, &store, entity).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Chapter deleted successfully")))
}
