//! Test application fixture
//!
//! Each `TestApp` owns a temporary directory holding its SQLite file and
//! upload root, so tests never share state.

use std::path::{Path, PathBuf};

use axum_test::TestServer;
use tempfile::TempDir;

use storyforge::backend::server::{create_app, AppState, ServerConfig, MIN_BCRYPT_COST};

pub const TEST_SECRET: &str = "storyforge-test-secret";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = format!("sqlite://{}", dir.path().join("test.db").display());

        let config = ServerConfig::builder()
            .database_url(database_url)
            .jwt_secret(TEST_SECRET)
            .bcrypt_cost(MIN_BCRYPT_COST)
            .upload_dir(dir.path().join("uploads"))
            .build()
            .expect("Invalid test config");

        let (app, state) = create_app(&config).await.expect("Failed to start app");
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            state,
            _dir: dir,
        }
    }

    pub fn upload_root(&self) -> &Path {
        self.state.blob_store.root()
    }

    /// Absolute path of a stored blob
    pub fn blob_path(&self, file_path: &str) -> PathBuf {
        self.upload_root().join(file_path)
    }
}
