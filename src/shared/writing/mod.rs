//! Writing Data Model
//!
//! Rows and request/response bodies for the containment tree
//! User → Project → Story → Chapter, plus the files attached to any of them.
//!
//! # Usage
//!
//! ```rust
//! use storyforge::shared::writing::{Project, Story, Chapter, FileRecord};
//! ```

pub mod user;
pub mod project;
pub mod story;
pub mod chapter;
pub mod file;

pub use user::{
    AuthResponse, Identity, LoginRequest, MeResponse, RegisterRequest, User, UserResponse,
};
pub use project::{Project, ProjectInput, ProjectListResponse, ProjectResponse};
pub use story::{Story, StoryInput, StoryListResponse, StoryResponse};
pub use chapter::{Chapter, ChapterInput, ChapterListResponse, ChapterResponse};
pub use file::{FileEntry, FileListResponse, FileRecord, UploadResponse};

use serde::{Deserialize, Serialize};

/// Plain `{message}` body used by deletes and the 404 fallback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
