/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database connection, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect the SQLite pool and apply migrations
 * 2. Create the upload directories
 * 3. Build the token issuer from the configured secret
 * 4. Create and configure the router
 *
 * Any failure here aborts startup; the server never runs without its
 * database or upload directory.
 */

use axum::Router;
use thiserror::Error;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::files::storage::BlobStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::database::connect_database;
use crate::backend::server::state::AppState;

/// Reasons the server cannot start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("upload directory error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Build the shared state described by `config`
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated, or the upload
/// directories cannot be created.
pub async fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    tracing::info!("Initializing StoryForge backend server");

    let db_pool = connect_database(config).await?;

    let blob_store = BlobStore::new(&config.upload_dir);
    blob_store.ensure_dirs().await?;
    tracing::info!("Upload directory ready at {}", blob_store.root().display());

    let tokens = TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl);

    Ok(AppState::new(db_pool, tokens, blob_store, config.bcrypt_cost))
}

/// Create and configure the Axum application
///
/// # Returns
///
/// The router together with the state it was built from, so the caller can
/// close the pool on shutdown.
pub async fn create_app(config: &ServerConfig) -> Result<(Router<()>, AppState), StartupError> {
    let state = build_state(config).await?;
    let app = create_router(state.clone(), &config.cors_origin);

    tracing::info!("Router configured");
    Ok((app, state))
}
