/**
 * Project Database Operations
 *
 * Every read joins the owner's username in as `owner_name`.
 */

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::writing::Project;

const SELECT_PROJECT: &str = r#"
    SELECT p.id, p.title, p.description, p.owner_id, u.username AS owner_name,
           p.created_at, p.updated_at
    FROM projects p
    JOIN users u ON u.id = p.owner_id
"#;

/// Projects owned by a user, most recently updated first
pub async fn list_projects(pool: &SqlitePool, owner_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        "{SELECT_PROJECT} WHERE p.owner_id = ? ORDER BY p.updated_at DESC, p.rowid DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn get_project(pool: &SqlitePool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!("{SELECT_PROJECT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a new project
///
/// # Arguments
/// * `title` - Already validated and trimmed
/// * `description` - `None` is stored as NULL
pub async fn create_project(
    pool: &SqlitePool,
    owner_id: Uuid,
    title: &str,
    description: Option<&str>,
) -> Result<Project, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO projects (id, title, description, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_project(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Replace title and description and bump `updated_at`.
/// Returns `None` if the project does not exist.
pub async fn update_project(
    pool: &SqlitePool,
    id: Uuid,
    title: &str,
    description: Option<&str>,
) -> Result<Option<Project>, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE projects SET title = ?, description = ?, updated_at = ? WHERE id = ?",
    )
    .bind(title)
    .bind(description)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_project(pool, id).await
}
