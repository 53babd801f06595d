//! Property-based tests for blob storage keys
//!
//! Uses proptest to generate random inputs and verify properties

use proptest::prelude::*;
use storyforge::backend::files::storage::{sanitize_base_name, BlobStore};

proptest! {
    #[test]
    fn test_sanitized_name_is_safe(name in ".*") {
        let sanitized = sanitize_base_name(&name);
        prop_assert!(sanitized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_sanitized_name_drops_directories(
        dir in "[a-z]{1,8}",
        stem in "[a-zA-Z0-9]{1,12}",
        ext in "[a-z]{1,4}",
    ) {
        let unix = format!("{}/{}.{}", dir, stem, ext);
        let windows = format!("C:\\{}\\{}.{}", dir, stem, ext);
        prop_assert_eq!(sanitize_base_name(&unix), stem.clone());
        prop_assert_eq!(sanitize_base_name(&windows), stem);
    }

    #[test]
    fn test_generated_key_is_a_single_path_segment(name in ".*") {
        let key = BlobStore::generate_key(&name);
        prop_assert!(!key.is_empty());
        prop_assert!(!key.contains('/') && !key.contains('\\'));
        prop_assert!(!key.contains(".."));
        prop_assert!(key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
    }

    #[test]
    fn test_generated_keys_do_not_collide(name in "[a-z]{1,8}\\.png") {
        prop_assert_ne!(BlobStore::generate_key(&name), BlobStore::generate_key(&name));
    }
}
