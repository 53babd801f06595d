//! Chapters
//!
//! Ordered children of a story holding rich HTML content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chapter row joined with its story and project titles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Chapter {
    pub id: Uuid,
    pub story_id: Uuid,
    pub title: String,
    pub content: String,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
    pub story_title: String,
    pub project_id: Uuid,
    pub project_title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChapterInput {
    /// Absent and `null` both fail validation as a missing title
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterListResponse {
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub chapter: Chapter,
}
