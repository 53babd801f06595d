/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The SQLite connection pool
 * - The JWT issuer used by the auth middleware and login/register
 * - The blob store that owns the upload directory
 * - The bcrypt cost used when hashing new passwords
 *
 * Every field is cheap to clone (pool handles and `Arc`s), so handlers
 * extract only the pieces they need.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // Query through the pool
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::credentials::CredentialStore;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::files::storage::BlobStore;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - SQLite connection pool (migrations already applied)
/// * `tokens` - Signs and verifies bearer tokens
/// * `blob_store` - Upload directory access
/// * `bcrypt_cost` - Work factor for new password hashes
#[derive(Clone, Debug)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub tokens: TokenIssuer,
    pub blob_store: BlobStore,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        db_pool: SqlitePool,
        tokens: TokenIssuer,
        blob_store: BlobStore,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            db_pool,
            tokens,
            blob_store,
            bcrypt_cost,
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows Axum handlers to extract the pool directly from `AppState`
/// using `State(SqlitePool)`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Implement FromRef for TokenIssuer
///
/// Used by the auth middleware via `from_fn_with_state`.
impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

/// Implement FromRef for BlobStore
impl FromRef<AppState> for BlobStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.blob_store.clone()
    }
}

/// Implement FromRef for CredentialStore
///
/// The store is assembled from the pool, the issuer and the bcrypt cost on
/// each extraction.
impl FromRef<AppState> for CredentialStore {
    fn from_ref(app_state: &AppState) -> Self {
        CredentialStore::new(
            app_state.db_pool.clone(),
            app_state.tokens.clone(),
            app_state.bcrypt_cost,
        )
    }
}
