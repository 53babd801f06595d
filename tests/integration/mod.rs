//! HTTP-level integration tests

pub mod files_test;
pub mod stories_chapters_test;
