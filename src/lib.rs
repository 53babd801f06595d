//! StoryForge - Main Library
//!
//! StoryForge is a multi-user writing backend. Authors organize work as
//! projects containing ordered stories, stories containing ordered chapters,
//! and attach images and documents to any level of that tree.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and API clients
//!   - User, project, story, chapter and file records
//!   - Request and response bodies
//!   - Field validation and error types
//!
//! - **`backend`** - Server-side code (only compiled with `server` feature)
//!   - Axum HTTP server and routing
//!   - JWT authentication and bcrypt password hashing
//!   - SQLite persistence via sqlx
//!   - File upload pipeline and local blob storage
//!
//! # Feature Flags
//!
//! - **`server`** (default) - Enables the backend modules and the
//!   `storyforge-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use storyforge::backend::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let (app, _state) = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error` for validation failures usable on either side
//! - `backend::error::BackendError` for everything a handler can return

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "server")]
pub mod backend;
