//! Property-based tests for entity kind naming

use proptest::prelude::*;
use storyforge::shared::entity::{to_plural, to_singular, EntityKind};

fn any_kind() -> impl Strategy<Value = EntityKind> {
    prop::sample::select(EntityKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_plural_and_singular_are_inverse(kind in any_kind()) {
        prop_assert_eq!(EntityKind::from_plural(kind.as_plural()).unwrap(), kind);
        prop_assert_eq!(EntityKind::from_singular(kind.as_singular()).unwrap(), kind);
        prop_assert_eq!(to_singular(kind.as_plural()).unwrap(), kind.as_singular());
        prop_assert_eq!(to_plural(kind.as_singular()).unwrap(), kind.as_plural());
    }

    #[test]
    fn test_unknown_names_are_rejected(name in "[a-z]{1,12}") {
        let known = EntityKind::ALL
            .iter()
            .any(|k| k.as_plural() == name || k.as_singular() == name);
        prop_assume!(!known);
        prop_assert!(EntityKind::from_plural(&name).is_err());
        prop_assert!(EntityKind::from_singular(&name).is_err());
    }
}
