/**
 * Chapter Database Operations
 *
 * Reads join the story and project for breadcrumbs (`story_title`,
 * `project_id`, `project_title`).
 */

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::writing::Chapter;

const SELECT_CHAPTER: &str = r#"
    SELECT c.id, c.story_id, c.title, c.content, c.order_index, c.created_at,
           s.title AS story_title, s.project_id, p.title AS project_title
    FROM chapters c
    JOIN stories s ON s.id = c.story_id
    JOIN projects p ON p.id = s.project_id
"#;

/// Chapters of a story in reading order
pub async fn list_chapters(pool: &SqlitePool, story_id: Uuid) -> Result<Vec<Chapter>, sqlx::Error> {
    sqlx::query_as::<_, Chapter>(&format!(
        "{SELECT_CHAPTER} WHERE c.story_id = ? ORDER BY c.order_index ASC, c.created_at ASC, c.rowid ASC"
    ))
    .bind(story_id)
    .fetch_all(pool)
    .await
}

pub async fn get_chapter(pool: &SqlitePool, id: Uuid) -> Result<Option<Chapter>, sqlx::Error> {
    sqlx::query_as::<_, Chapter>(&format!("{SELECT_CHAPTER} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Append a chapter to a story at `max(order_index) + 1`
pub async fn create_chapter(
    pool: &SqlitePool,
    story_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Chapter, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO chapters (id, story_id, title, content, order_index, created_at)
        SELECT ?, ?, ?, ?, COALESCE(MAX(order_index), 0) + 1, ?
        FROM chapters WHERE story_id = ?
        "#,
    )
    .bind(id)
    .bind(story_id)
    .bind(title)
    .bind(content)
    .bind(Utc::now())
    .bind(story_id)
    .execute(pool)
    .await?;

    get_chapter(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Overwrite title and content. Last write wins.
pub async fn update_chapter(
    pool: &SqlitePool,
    id: Uuid,
    title: &str,
    content: &str,
) -> Result<Option<Chapter>, sqlx::Error> {
    let result = sqlx::query("UPDATE chapters SET title = ?, content = ? WHERE id = ?")
        .bind(title)
        .bind(content)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_chapter(pool, id).await
}
