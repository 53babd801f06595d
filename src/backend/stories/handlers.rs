/**
 * Story HTTP Handlers
 *
 * - `GET|POST /api/stories/projects/{project_id}/stories` - list, create
 * - `GET|PUT|DELETE /api/stories/{id}` - read, replace, delete
 *
 * Creating a story appends it to the end of its project
 * (`order_index = max + 1`); `order_index` can be set explicitly on update.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::extract::{parse_id, ApiJson};
use crate::backend::files::storage::BlobStore;
use crate::backend::middleware::AuthUser;
use crate::backend::ownership::require_owner;
use crate::backend::stories::db;
use crate::backend::tree::delete_subtree;
use crate::shared::entity::EntityRef;
use crate::shared::validation::{normalize_description, validate_title};
use crate::shared::writing::{MessageResponse, StoryInput, StoryListResponse, StoryResponse};

fn not_found() -> BackendError {
    BackendError::not_found("Story not found")
}

pub async fn list_stories(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<String>,
) -> Result<Json<StoryListResponse>, BackendError> {
    let project_id = parse_id(&project_id, "Project")?;
    require_owner(&pool, user.user_id, EntityRef::Project(project_id)).await?;

    let stories = db::list_stories(&pool, project_id).await?;
    Ok(Json(StoryListResponse { stories }))
}

pub async fn get_story(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<StoryResponse>, BackendError> {
    let id = parse_id(&id, "Story")?;
    require_owner(&pool, user.user_id, EntityRef::Story(id)).await?;

    let story = db::get_story(&pool, id).await?.ok_or_else(not_found)?;
    Ok(Json(StoryResponse {
        message: None,
        story,
    }))
}

pub async fn create_story(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<String>,
    ApiJson(input): ApiJson<StoryInput>,
) -> Result<(StatusCode, Json<StoryResponse>), BackendError> {
    let project_id = parse_id(&project_id, "Project")?;
    require_owner(&pool, user.user_id, EntityRef::Project(project_id)).await?;

    let title = validate_title("Story", input.title.as_deref().unwrap_or_default())?;
    let description = normalize_description(input.description);

    let story = db::create_story(&pool, project_id, &title, description.as_deref()).await?;
    tracing::info!(
        "Story {} created in project {} at position {}",
        story.id,
        project_id,
        story.order_index
    );

    Ok((
        StatusCode::CREATED,
        Json(StoryResponse {
            message: Some("Story created successfully".to_string()),
            story,
        }),
    ))
}

pub async fn update_story(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<StoryInput>,
) -> Result<Json<StoryResponse>, BackendError> {
    let id = parse_id(&id, "Story")?;
    require_owner(&pool, user.user_id, EntityRef::Story(id)).await?;

    let title = validate_title("Story", input.title.as_deref().unwrap_or_default())?;
    let description = normalize_description(input.description);

    let story = db::update_story(&pool, id, &title, description.as_deref(), input.order_index)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(StoryResponse {
        message: Some("Story updated successfully".to_string()),
        story,
    }))
}

/// Delete a story with its chapters and files
pub async fn delete_story(
    State(pool): State<SqlitePool>,
    State(store): State<BlobStore>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let id = parse_id(&id, "Story")?;
    let entity = EntityRef::Story(id);
    require_owner(&pool, user.user_id, entity).await?;

    if !delete_subtree(&pool, &store, entity).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Story deleted successfully")))
}
