/**
 * Containment Tree
 *
 * Deleting a project, story or chapter takes everything beneath it along:
 * child rows go through `ON DELETE CASCADE`, file rows (which have no foreign
 * key) are deleted explicitly in the same transaction, and the blobs are
 * removed once the transaction has committed.
 */

use sqlx::SqlitePool;

use crate::backend::files::db::delete_files_in_subtree;
use crate::backend::files::storage::BlobStore;
use crate::shared::entity::EntityRef;

fn table_of(entity: EntityRef) -> &'static str {
    match entity {
        EntityRef::Project(_) => "projects",
        EntityRef::Story(_) => "stories",
        EntityRef::Chapter(_) => "chapters",
    }
}

/// Delete `entity` with its descendants and attached files.
///
/// Returns `false` when the row did not exist. Blob removal failures are
/// logged and never fail the delete.
pub async fn delete_subtree(
    pool: &SqlitePool,
    store: &BlobStore,
    entity: EntityRef,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let blob_paths = delete_files_in_subtree(&mut *tx, entity).await?;

    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table_of(entity)))
        .bind(entity.id())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    tracing::info!("Deleted {} with {} attached file(s)", entity, blob_paths.len());

    for path in &blob_paths {
        store.remove_best_effort(path).await;
    }

    Ok(true)
}
