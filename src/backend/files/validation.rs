/**
 * Upload Validation
 *
 * Every uploaded file must declare an allowed content type, carry an
 * extension from the same category, and fit the category's size limit.
 *
 * | Category   | Content types                                   | Extensions                 | Limit |
 * |------------|-------------------------------------------------|----------------------------|-------|
 * | `image`    | jpeg, jpg, png, gif                             | .jpg .jpeg .png .gif       | 5MB   |
 * | `document` | pdf, msword, docx, text/plain                   | .pdf .doc .docx .txt       | 10MB  |
 */

use std::fmt;
use std::path::Path;

use serde_json::{json, Value};
use thiserror::Error;

use crate::shared::validation::FILENAME_MAX_CHARS;

const MB: u64 = 1024 * 1024;

/// Maximum number of files in one upload request
pub const MAX_FILES_PER_REQUEST: usize = 5;

/// Request body limit for the upload route
pub const MAX_UPLOAD_BODY_BYTES: usize = (MAX_FILES_PER_REQUEST as u64 * 10 * MB + MB) as usize;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt"];

/// Allow-listed file families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Document,
}

impl FileCategory {
    /// Category of a normalized content type, if it is allowed at all
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if IMAGE_TYPES.contains(&content_type) {
            Some(FileCategory::Image)
        } else if DOCUMENT_TYPES.contains(&content_type) {
            Some(FileCategory::Document)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Document => "document",
        }
    }

    pub fn max_bytes(&self) -> u64 {
        match self {
            FileCategory::Image => 5 * MB,
            FileCategory::Document => 10 * MB,
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Image => IMAGE_EXTENSIONS,
            FileCategory::Document => DOCUMENT_EXTENSIONS,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why one uploaded file was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("File type {content_type} is not allowed")]
    UnsupportedType {
        filename: String,
        content_type: String,
    },

    /// Extension does not belong to the declared type's category
    #[error("File extension {} is not allowed", display_extension(.extension))]
    ExtensionMismatch {
        filename: String,
        extension: String,
        content_type: String,
    },

    #[error("File too large. {category} files must be {}MB or smaller.", .category.max_bytes() / MB)]
    TooLarge {
        filename: String,
        size: u64,
        category: FileCategory,
    },

    #[error("Filename must be {} characters or less", FILENAME_MAX_CHARS)]
    FilenameTooLong { filename: String },
}

fn display_extension(extension: &str) -> &str {
    if extension.is_empty() {
        "(none)"
    } else {
        extension
    }
}

impl UploadError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::UnsupportedType { .. } | UploadError::ExtensionMismatch { .. } => {
                "UnsupportedType"
            }
            UploadError::TooLarge { .. } => "TooLarge",
            UploadError::FilenameTooLong { .. } => "InvalidFilename",
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            UploadError::UnsupportedType { filename, .. }
            | UploadError::ExtensionMismatch { filename, .. }
            | UploadError::TooLarge { filename, .. }
            | UploadError::FilenameTooLong { filename } => filename,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "filename": self.filename(),
            "code": self.code(),
            "message": self.to_string(),
        })
    }
}

/// Lowercase a content type and drop any parameters (`; charset=...`)
pub fn normalize_content_type(raw: &str) -> String {
    raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Lowercased extension including the dot, or `""`
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Validate one file's metadata
pub fn validate(filename: &str, content_type: &str, size: u64) -> Result<FileCategory, UploadError> {
    if filename.chars().count() > FILENAME_MAX_CHARS {
        return Err(UploadError::FilenameTooLong {
            filename: filename.to_string(),
        });
    }

    let content_type = normalize_content_type(content_type);
    let category = FileCategory::from_content_type(&content_type).ok_or_else(|| {
        UploadError::UnsupportedType {
            filename: filename.to_string(),
            content_type: content_type.clone(),
        }
    })?;

    let extension = extension_of(filename);
    if !category.extensions().contains(&extension.as_str()) {
        return Err(UploadError::ExtensionMismatch {
            filename: filename.to_string(),
            extension,
            content_type,
        });
    }

    if size > category.max_bytes() {
        return Err(UploadError::TooLarge {
            filename: filename.to_string(),
            size,
            category,
        });
    }

    Ok(category)
}

/// `Content-Type` to serve a stored blob with
pub fn content_type_for_extension(filename: &str) -> &'static str {
    match extension_of(filename).as_str() {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
