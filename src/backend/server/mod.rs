//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`config`** - Environment-driven configuration and validation
//! - **`database`** - SQLite pool creation and embedded migrations
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - ServerConfig, builder, from_env
//! ├── database.rs     - Pool + migrations
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env` (after `dotenv`)
//! 2. **Database**: pool connected, foreign keys on, migrations applied
//! 3. **Storage**: upload directories created
//! 4. **Router Creation**: routes, auth middleware, CORS, tracing, panic guard

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Database pool and migrations
pub mod database;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
pub use init::{build_state, create_app, StartupError};
pub use state::AppState;
