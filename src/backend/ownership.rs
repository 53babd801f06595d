/**
 * Ownership Resolver
 *
 * Answers whether a user may act on a project, story, chapter or file by
 * walking the containment chain up to the project and comparing its owner.
 *
 * # Chains
 *
 * - Project: `projects.owner_id`
 * - Story: story → project
 * - Chapter: chapter → story → project
 * - File: `(entity_type, entity_id)` → one of the above
 *
 * A missing row and somebody else's row produce the same answer, so callers
 * cannot probe for the existence of other users' data.
 */

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::files::db::get_file;
use crate::shared::entity::EntityRef;
use crate::shared::writing::FileRecord;

/// Outcome of an ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    NotFoundOrDenied,
}

/// Check whether `user_id` owns the project at the top of `entity`'s chain
///
/// Runs on a pool or inside an open transaction.
pub async fn authorize<'e, E>(
    executor: E,
    user_id: Uuid,
    entity: EntityRef,
) -> Result<Access, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let sql = match entity {
        EntityRef::Project(_) => {
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ? AND owner_id = ?)"
        }
        EntityRef::Story(_) => {
            r#"
            SELECT EXISTS(
                SELECT 1 FROM stories s
                JOIN projects p ON p.id = s.project_id
                WHERE s.id = ? AND p.owner_id = ?
            )
            "#
        }
        EntityRef::Chapter(_) => {
            r#"
            SELECT EXISTS(
                SELECT 1 FROM chapters c
                JOIN stories s ON s.id = c.story_id
                JOIN projects p ON p.id = s.project_id
                WHERE c.id = ? AND p.owner_id = ?
            )
            "#
        }
    };

    let owned: bool = sqlx::query_scalar(sql)
        .bind(entity.id())
        .bind(user_id)
        .fetch_one(executor)
        .await?;

    Ok(if owned {
        Access::Allowed
    } else {
        Access::NotFoundOrDenied
    })
}

/// Fail with 404 "{Kind} not found" unless `user_id` owns `entity`
pub async fn require_owner(
    pool: &SqlitePool,
    user_id: Uuid,
    entity: EntityRef,
) -> Result<(), BackendError> {
    match authorize(pool, user_id, entity).await? {
        Access::Allowed => Ok(()),
        Access::NotFoundOrDenied => {
            tracing::warn!("Access denied or missing: {} for user {}", entity, user_id);
            Err(BackendError::not_found(format!("{} not found", entity.kind().label())))
        }
    }
}

/// Load a file row if `user_id` owns the entity it is attached to
pub async fn authorize_file(
    pool: &SqlitePool,
    user_id: Uuid,
    file_id: Uuid,
) -> Result<FileRecord, BackendError> {
    let file = get_file(pool, file_id)
        .await?
        .ok_or_else(|| BackendError::not_found("File not found"))?;

    match authorize(pool, user_id, file.owner_entity()).await? {
        Access::Allowed => Ok(file),
        Access::NotFoundOrDenied => {
            tracing::warn!("Access denied or missing: file {} for user {}", file_id, user_id);
            Err(BackendError::not_found("File not found"))
        }
    }
}
