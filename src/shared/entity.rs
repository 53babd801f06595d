//! Entity Kinds
//!
//! The three containers a file can be attached to. URLs address them by their
//! plural resource name (`projects`, `stories`, `chapters`) while the `files`
//! table stores the singular form (`project`, `story`, `chapter`).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Closed set of entities that own files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Story,
    Chapter,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Project, EntityKind::Story, EntityKind::Chapter];

    /// Storage name
    pub fn as_singular(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Story => "story",
            EntityKind::Chapter => "chapter",
        }
    }

    /// Resource name used in URLs and in the blob directory layout
    pub fn as_plural(&self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::Story => "stories",
            EntityKind::Chapter => "chapters",
        }
    }

    /// Parse a plural resource name. Anything else is rejected.
    pub fn from_plural(value: &str) -> Result<Self, SharedError> {
        match value {
            "projects" => Ok(EntityKind::Project),
            "stories" => Ok(EntityKind::Story),
            "chapters" => Ok(EntityKind::Chapter),
            _ => Err(SharedError::unknown_entity_type(value)),
        }
    }

    /// Parse a stored singular name. Anything else is rejected.
    pub fn from_singular(value: &str) -> Result<Self, SharedError> {
        match value {
            "project" => Ok(EntityKind::Project),
            "story" => Ok(EntityKind::Story),
            "chapter" => Ok(EntityKind::Chapter),
            _ => Err(SharedError::unknown_entity_type(value)),
        }
    }

    /// Human label used in error messages ("Project not found")
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Story => "Story",
            EntityKind::Chapter => "Chapter",
        }
    }
}

/// Map a plural resource name to its storage form
pub fn to_singular(plural: &str) -> Result<&'static str, SharedError> {
    EntityKind::from_plural(plural).map(|kind| kind.as_singular())
}

/// Map a storage name back to its resource form
pub fn to_plural(singular: &str) -> Result<&'static str, SharedError> {
    EntityKind::from_singular(singular).map(|kind| kind.as_plural())
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_singular())
    }
}

impl TryFrom<String> for EntityKind {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EntityKind::from_singular(&value)
    }
}

/// A reference to one concrete project, story or chapter row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Project(Uuid),
    Story(Uuid),
    Chapter(Uuid),
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: Uuid) -> Self {
        match kind {
            EntityKind::Project => EntityRef::Project(id),
            EntityKind::Story => EntityRef::Story(id),
            EntityKind::Chapter => EntityRef::Chapter(id),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Project(_) => EntityKind::Project,
            EntityRef::Story(_) => EntityKind::Story,
            EntityRef::Chapter(_) => EntityKind::Chapter,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            EntityRef::Project(id) | EntityRef::Story(id) | EntityRef::Chapter(id) => *id,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}
