//! Test suite for StoryForge
//!
//! This module organizes all tests

pub mod integration;
pub mod property;
