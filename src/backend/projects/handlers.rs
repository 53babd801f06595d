/**
 * Project HTTP Handlers
 *
 * - `GET /api/projects` - the caller's projects
 * - `POST /api/projects` - create
 * - `GET|PUT|DELETE /api/projects/{id}` - read, replace, delete
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
use crate::backend::projects::db;
use crate::backend::tree::delete_subtree;
use crate::shared::entity::EntityRef;
use crate::shared::validation::{normalize_description, validate_title};
use crate::shared::writing::{
    MessageResponse, ProjectInput, ProjectListResponse, ProjectResponse,
};

fn not_found() -> BackendError {
    BackendError::not_found("Project not found")
}

/// List the caller's projects, most recently updated first
pub async fn list_projects(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProjectListResponse>, BackendError> {
    let projects = db::list_projects(&pool, user.user_id).await?;
    Ok(Json(ProjectListResponse { projects }))
}

pub async fn get_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, BackendError> {
    let id = parse_id(&id, "Project")?;
    require_owner(&pool, user.user_id, EntityRef::Project(id)).await?;

    let project = db::get_project(&pool, id).await?.ok_or_else(not_found)?;
    Ok(Json(ProjectResponse {
        message: None,
        project,
    }))
}

pub async fn create_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(input): ApiJson<ProjectInput>,
) -> Result<(StatusCode, Json<ProjectResponse>), BackendError> {
    let title = validate_title("Project", input.title.as_deref().unwrap_or_default())?;
    let description = normalize_description(input.description);

    let project = db::create_project(&pool, user.user_id, &title, description.as_deref()).await?;
    tracing::info!("Project {} created by user {}", project.id, user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            message: Some("Project created successfully".to_string()),
            project,
        }),
    ))
}

pub async fn update_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> Result<Json<ProjectResponse>, BackendError> {
    let id = parse_id(&id, "Project")?;
    require_owner(&pool, user.user_id, EntityRef::Project(id)).await?;

    let title = validate_title("Project", input.title.as_deref().unwrap_or_default())?;
    let description = normalize_description(input.description);

    let project = db::update_project(&pool, id, &title, description.as_deref())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ProjectResponse {
        message: Some("Project updated successfully".to_string()),
        project,
    }))
}

/// Delete a project with all its stories, chapters and files
pub async fn delete_project(
    State(pool): State<SqlitePool>,
    State(store): State<BlobStore>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let id = parse_id(&id, "Project")?;
    let entity = EntityRef::Project(id);
    require_owner(&pool, user.user_id, entity).await?;

    if !delete_subtree(&pool, &store, entity).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
