//! Property-based tests for upload and field validation

use proptest::prelude::*;
use storyforge::backend::files::validation::{validate, FileCategory, UploadError};
use storyforge::shared::validation::{validate_title, TITLE_MAX_CHARS};

const MB: u64 = 1024 * 1024;

fn image() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop::sample::select(vec![
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
    ])
}

proptest! {
    #[test]
    fn test_images_up_to_five_megabytes_pass(
        stem in "[a-z]{1,10}",
        (ext, mime) in image(),
        size in 0..=5 * MB,
    ) {
        let name = format!("{}.{}", stem, ext);
        prop_assert_eq!(validate(&name, mime, size), Ok(FileCategory::Image));
    }

    #[test]
    fn test_images_over_five_megabytes_fail(
        (ext, mime) in image(),
        size in (5 * MB + 1)..(50 * MB),
    ) {
        let name = format!("cover.{}", ext);
        let is_too_large = matches!(validate(&name, mime, size), Err(UploadError::TooLarge { .. }));
        prop_assert!(is_too_large);
    }

    #[test]
    fn test_titles_are_trimmed(title in "[a-zA-Z0-9 ]{1,100}", pad in " {0,5}") {
        prop_assume!(!title.trim().is_empty());
        let padded = format!("{}{}{}", pad, title, pad);
        prop_assert_eq!(validate_title("Story", &padded).unwrap(), title.trim());
    }

    #[test]
    fn test_overlong_titles_fail(extra in 1usize..50) {
        let title = "x".repeat(TITLE_MAX_CHARS + extra);
        prop_assert!(validate_title("Project", &title).is_err());
    }
}
