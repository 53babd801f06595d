//! Chapters
//!
//! Ordered children of a story holding the manuscript text.

pub mod db;
pub mod handlers;

pub use handlers::{create_chapter, delete_chapter, get_chapter, list_chapters, update_chapter};
