/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/health` - Liveness probe
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 *
 * ## Authenticated
 * - `GET /api/auth/me`
 * - `GET|POST /api/projects`, `GET|PUT|DELETE /api/projects/{id}`
 * - `GET|POST /api/stories/projects/{project_id}/stories`,
 *   `GET|PUT|DELETE /api/stories/{id}`
 * - `GET|POST /api/chapters/stories/{story_id}/chapters`,
 *   `GET|PUT|DELETE /api/chapters/{id}`
 * - `POST /api/files/upload/{entity_type}/{entity_id}`,
 *   `GET /api/files/entity/{entity_type}/{entity_id}`,
 *   `GET|DELETE /api/files/{file_id}`
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::backend::auth::{get_me, login, register};
use crate::backend::chapters::{
    create_chapter, delete_chapter, get_chapter, list_chapters, update_chapter,
};
use crate::backend::files::validation::MAX_UPLOAD_BODY_BYTES;
use crate::backend::files::{delete_file, download_file, list_entity_files, upload_files};
use crate::backend::middleware::auth_middleware;
use crate::backend::projects::{
    create_project, delete_project, get_project, list_projects, update_project,
};
use crate::backend::server::state::AppState;
use crate::backend::stories::{create_story, delete_story, get_story, list_stories, update_story};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub timestamp: chrono::DateTime<Utc>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
    })
}

/// Configure routes that need no token
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Configure API routes guarded by the auth middleware
///
/// The middleware is applied with `route_layer`, so unknown paths still
/// reach the fallback instead of answering 401.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        // Projects
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        // Stories
        .route(
            "/api/stories/projects/{project_id}/stories",
            get(list_stories).post(create_story),
        )
        .route(
            "/api/stories/{id}",
            get(get_story).put(update_story).delete(delete_story),
        )
        // Chapters
        .route(
            "/api/chapters/stories/{story_id}/chapters",
            get(list_chapters).post(create_chapter),
        )
        .route(
            "/api/chapters/{id}",
            get(get_chapter).put(update_chapter).delete(delete_chapter),
        )
        // Files
        .route(
            "/api/files/upload/{entity_type}/{entity_id}",
            post(upload_files).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        .route(
            "/api/files/entity/{entity_type}/{entity_id}",
            get(list_entity_files),
        )
        .route("/api/files/{file_id}", get(download_file).delete(delete_file))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    router.merge(protected)
}
