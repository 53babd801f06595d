//! Stories
//!
//! Ordered children of a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A story row joined with its project's title for breadcrumbs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Story {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
    pub project_title: String,
}

/// Body of story create/update. `order_index` is only honoured on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryInput {
    /// Absent and `null` both fail validation as a missing title
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryListResponse {
    pub stories: Vec<Story>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub story: Story,
}
