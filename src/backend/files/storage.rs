/**
 * Blob Storage
 *
 * Uploaded files live on disk under the upload root, one directory per
 * entity type:
 *
 * ```text
 * uploads/
 * ├── projects/
 * ├── stories/
 * └── chapters/
 *     └── 1718000000000-483920174-chapter-one.pdf
 * ```
 *
 * Keys are `{timestamp_ms}-{random}-{sanitized base name}{ext}`. The base
 * name keeps only `[A-Za-z0-9-_]`, so keys can never escape their directory.
 */

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::shared::entity::EntityKind;

/// Disk-backed key/value store for uploaded blobs
#[derive(Clone, Debug)]
pub struct BlobStore {
    root: Arc<PathBuf>,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the per-entity directories
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        for kind in EntityKind::ALL {
            tokio::fs::create_dir_all(self.root.join(kind.as_plural())).await?;
        }
        Ok(())
    }

    /// Generate a fresh storage key for an uploaded filename
    pub fn generate_key(original_name: &str) -> String {
        let random = Uuid::new_v4().as_u128() % 1_000_000_000;
        format!(
            "{}-{}-{}{}",
            Utc::now().timestamp_millis(),
            random,
            sanitize_base_name(original_name),
            sanitized_extension(original_name)
        )
    }

    /// Write a new blob and return its path relative to the root
    pub async fn put(&self, kind: EntityKind, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        let dir = self.root.join(kind.as_plural());
        tokio::fs::create_dir_all(&dir).await?;

        let key = Self::generate_key(original_name);
        let path = dir.join(&key);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        if let Err(e) = write_all(&mut file, bytes).await {
            drop(file);
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e);
        }

        Ok(format!("{}/{}", kind.as_plural(), key))
    }

    /// Absolute path of a stored blob. Anything that could leave the root
    /// is rejected.
    pub fn resolve(&self, relative: &str) -> io::Result<PathBuf> {
        let relative = Path::new(relative);
        let safe = !relative.as_os_str().is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !safe {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing storage path {}", relative.display()),
            ));
        }
        Ok(self.root.join(relative))
    }

    pub async fn read(&self, relative: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(relative)?).await
    }

    pub async fn remove(&self, relative: &str) -> io::Result<()> {
        tokio::fs::remove_file(self.resolve(relative)?).await
    }

    /// Remove a blob, logging instead of failing
    pub async fn remove_best_effort(&self, relative: &str) {
        match self.remove(relative).await {
            Ok(()) => tracing::debug!("Deleted blob {}", relative),
            Err(e) => tracing::warn!("Could not delete blob {}: {}", relative, e),
        }
    }
}

async fn write_all(file: &mut tokio::fs::File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

/// File stem with everything outside `[A-Za-z0-9-_]` removed
pub fn sanitize_base_name(original_name: &str) -> String {
    // Clients may send Windows paths; only the last segment counts.
    let last = original_name.rsplit(&['/', '\\'][..]).next().unwrap_or_default();
    let stem = Path::new(last)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    stem.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn sanitized_extension(original_name: &str) -> String {
    let ext: String = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if ext.is_empty() {
        String::new()
    } else {
        format!(".{}", ext.to_ascii_lowercase())
    }
}
