//! Property-based tests

pub mod entity_proptest;
pub mod storage_proptest;
pub mod validation_proptest;
