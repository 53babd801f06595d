//! Backend Module
//!
//! This module contains all server-side code for StoryForge: an Axum HTTP
//! API over a SQLite database and a local upload directory.
//!
//! This module is only compiled when the `server` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, database pool, application state, startup
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, JWT tokens, user queries
//! - **`middleware`** - Bearer-token authentication
//! - **`ownership`** - Resolves any entity to its owning user
//! - **`projects`**, **`stories`**, **`chapters`** - The writing hierarchy
//! - **`files`** - Upload validation, storage, metadata and download
//! - **`tree`** - Subtree deletion with blob cleanup
//! - **`extract`** - JSON and path extraction helpers
//! - **`error`** - Backend error type and HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Startup and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── projects/       - Project CRUD
//! ├── stories/        - Story CRUD
//! ├── chapters/       - Chapter CRUD
//! ├── files/          - File pipeline
//! ├── ownership.rs    - Ownership resolver
//! ├── tree.rs         - Cascading delete
//! ├── extract.rs      - Extractors
//! └── error/          - Error types
//! ```
//!
//! # Ownership
//!
//! Every project, story, chapter and file belongs to exactly one user through
//! the chain `file → entity → … → project → owner`. Handlers call
//! `ownership::require_owner` before touching data; a resource owned by
//! someone else answers exactly like a missing one (404).
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Every variant maps to a status
//! code and a `{"message": ...}` JSON body; internal failures are logged
//! and answered with a generic 500.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Request extractors
pub mod extract;

/// Entity ownership checks
pub mod ownership;

/// Cascading deletes
pub mod tree;

/// Projects
pub mod projects;

/// Stories
pub mod stories;

/// Chapters
pub mod chapters;

/// File uploads
pub mod files;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
