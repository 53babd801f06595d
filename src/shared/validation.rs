//! Field Validation
//!
//! Length and presence rules shared by every create/update operation.

use crate::shared::error::SharedError;

/// Maximum title length in characters for projects, stories and chapters
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum chapter body size in bytes
pub const CHAPTER_CONTENT_MAX_BYTES: usize = 65_535;

/// Maximum original filename length in characters
pub const FILENAME_MAX_CHARS: usize = 255;

/// Minimum password length in characters
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Trim and check a title. `label` prefixes the messages ("Story title is required").
pub fn validate_title(label: &str, title: &str) -> Result<String, SharedError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(
            "title",
            format!("{} title is required", label),
        ));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(SharedError::validation(
            "title",
            format!("{} title must be {} characters or less", label, TITLE_MAX_CHARS),
        ));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as NULL
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

pub fn validate_chapter_content(content: &str) -> Result<(), SharedError> {
    if content.len() > CHAPTER_CONTENT_MAX_BYTES {
        return Err(SharedError::validation(
            "content",
            format!(
                "Chapter content is too long (maximum {} bytes)",
                CHAPTER_CONTENT_MAX_BYTES
            ),
        ));
    }
    Ok(())
}
