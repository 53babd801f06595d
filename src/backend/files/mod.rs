//! File Attachments
//!
//! Upload, list, download and delete files attached to projects, stories
//! and chapters.
//!
//! # Module Structure
//!
//! ```text
//! files/
//! ├── mod.rs          - Module exports and documentation
//! ├── validation.rs   - Content-type, extension, name and size rules
//! ├── storage.rs      - Disk-backed blob store and key generation
//! ├── pipeline.rs     - Received → Validated → Stored → Recorded
//! ├── db.rs           - `files` table queries
//! └── handlers.rs     - HTTP handlers
//! ```

pub mod db;
pub mod handlers;
pub mod pipeline;
pub mod storage;
pub mod validation;

pub use handlers::{delete_file, download_file, list_entity_files, upload_files};
pub use storage::BlobStore;
pub use validation::{FileCategory, UploadError};
