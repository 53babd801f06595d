//! Stories
//!
//! Ordered children of a project.

pub mod db;
pub mod handlers;

pub use handlers::{create_story, delete_story, get_story, list_stories, update_story};
