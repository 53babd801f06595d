/**
 * Story Database Operations
 *
 * Reads join the parent project's title in as `project_title`.
 */

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::writing::Story;

const SELECT_STORY: &str = r#"
    SELECT s.id, s.project_id, s.title, s.description, s.order_index, s.created_at,
           p.title AS project_title
    FROM stories s
    JOIN projects p ON p.id = s.project_id
"#;

/// Stories of a project in display order
pub async fn list_stories(pool: &SqlitePool, project_id: Uuid) -> Result<Vec<Story>, sqlx::Error> {
    sqlx::query_as::<_, Story>(&format!(
        "{SELECT_STORY} WHERE s.project_id = ? ORDER BY s.order_index ASC, s.created_at ASC, s.rowid ASC"
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn get_story(pool: &SqlitePool, id: Uuid) -> Result<Option<Story>, sqlx::Error> {
    sqlx::query_as::<_, Story>(&format!("{SELECT_STORY} WHERE s.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Append a story to a project.
///
/// The next `order_index` is computed inside the INSERT so two concurrent
/// creates cannot both read the same maximum.
pub async fn create_story(
    pool: &SqlitePool,
    project_id: Uuid,
    title: &str,
    description: Option<&str>,
) -> Result<Story, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO stories (id, project_id, title, description, order_index, created_at)
        SELECT ?, ?, ?, ?, COALESCE(MAX(order_index), 0) + 1, ?
        FROM stories WHERE project_id = ?
        "#,
    )
    .bind(id)
    .bind(project_id)
    .bind(title)
    .bind(description)
    .bind(Utc::now())
    .bind(project_id)
    .execute(pool)
    .await?;

    get_story(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Replace title and description; `order_index` only changes when given.
/// The parent project never changes. Returns `None` if the story is gone.
pub async fn update_story(
    pool: &SqlitePool,
    id: Uuid,
    title: &str,
    description: Option<&str>,
    order_index: Option<i64>,
) -> Result<Option<Story>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE stories
        SET title = ?, description = ?, order_index = COALESCE(?, order_index)
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(order_index)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_story(pool, id).await
}
