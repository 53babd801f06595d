/**
 * File Metadata Database Operations
 *
 * Rows of the `files` table. The `(entity_type, entity_id)` pair has no
 * foreign key, so subtree deletes clean these rows up explicitly.
 */

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::files::pipeline::StoredFile;
use crate::backend::ownership::{authorize, Access};
use crate::shared::entity::EntityRef;
use crate::shared::writing::{FileEntry, FileRecord};

const FILE_COLUMNS: &str =
    "id, entity_type, entity_id, filename, file_path, file_size, uploaded_by, uploaded_at";

/// Record every stored file of one upload in a single transaction.
///
/// Ownership is checked again inside the transaction. Returns `None`, with
/// nothing written, when the entity was deleted or changed hands since the
/// handler's check.
pub async fn insert_files(
    pool: &SqlitePool,
    entity: EntityRef,
    uploaded_by: Uuid,
    stored: &[StoredFile],
) -> Result<Option<Vec<FileRecord>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    if authorize(&mut *tx, uploaded_by, entity).await? != Access::Allowed {
        tx.rollback().await?;
        return Ok(None);
    }
    let uploaded_at = Utc::now();
    let mut records = Vec::with_capacity(stored.len());

    for file in stored {
        let record = sqlx::query_as::<_, FileRecord>(&format!(
            r#"
            INSERT INTO files ({FILE_COLUMNS})
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {FILE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(entity.kind().as_singular())
        .bind(entity.id())
        .bind(&file.filename)
        .bind(&file.file_path)
        .bind(file.size)
        .bind(uploaded_by)
        .bind(uploaded_at)
        .fetch_one(&mut *tx)
        .await?;

        records.push(record);
    }

    tx.commit().await?;
    Ok(Some(records))
}

/// Files attached to one entity, newest first, with the uploader's username
pub async fn list_files_for_entity(
    pool: &SqlitePool,
    entity: EntityRef,
) -> Result<Vec<FileEntry>, sqlx::Error> {
    sqlx::query_as::<_, FileEntry>(
        r#"
        SELECT f.id, f.entity_type, f.entity_id, f.filename, f.file_path, f.file_size,
               f.uploaded_by, f.uploaded_at, u.username AS uploaded_by_name
        FROM files f
        JOIN users u ON u.id = f.uploaded_by
        WHERE f.entity_type = ? AND f.entity_id = ?
        ORDER BY f.uploaded_at DESC, f.rowid DESC
        "#,
    )
    .bind(entity.kind().as_singular())
    .bind(entity.id())
    .fetch_all(pool)
    .await
}

pub async fn get_file(pool: &SqlitePool, id: Uuid) -> Result<Option<FileRecord>, sqlx::Error> {
    sqlx::query_as::<_, FileRecord>(&format!("SELECT {FILE_COLUMNS} FROM files WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns whether a row was removed
pub async fn delete_file(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM files WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete the file rows attached to `entity` or anything beneath it.
/// Returns the storage paths of the removed rows.
pub async fn delete_files_in_subtree(
    conn: &mut SqliteConnection,
    entity: EntityRef,
) -> Result<Vec<String>, sqlx::Error> {
    let id = entity.id();
    let query = match entity {
        EntityRef::Project(_) => sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM files
            WHERE (entity_type = 'project' AND entity_id = ?)
               OR (entity_type = 'story' AND entity_id IN (
                       SELECT id FROM stories WHERE project_id = ?))
               OR (entity_type = 'chapter' AND entity_id IN (
                       SELECT c.id FROM chapters c
                       JOIN stories s ON s.id = c.story_id
                       WHERE s.project_id = ?))
            RETURNING file_path
            "#,
        )
        .bind(id)
        .bind(id)
        .bind(id),
        EntityRef::Story(_) => sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM files
            WHERE (entity_type = 'story' AND entity_id = ?)
               OR (entity_type = 'chapter' AND entity_id IN (
                       SELECT id FROM chapters WHERE story_id = ?))
            RETURNING file_path
            "#,
        )
        .bind(id)
        .bind(id),
        EntityRef::Chapter(_) => sqlx::query_scalar::<_, String>(
            "DELETE FROM files WHERE entity_type = 'chapter' AND entity_id = ? RETURNING file_path",
        )
        .bind(id),
    };

    query.fetch_all(conn).await
}
