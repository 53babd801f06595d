//! Projects
//!
//! Top-level containers, each owned by one user.
//!
//! # Module Structure
//!
//! ```text
//! projects/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - `projects` table queries
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod db;
pub mod handlers;

pub use handlers::{create_project, delete_project, get_project, list_projects, update_project};
