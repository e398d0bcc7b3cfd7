//! Property-based tests for Levenshtein distance

use proptest::prelude::*;

use crate::core::reformulation::levenshtein;

proptest! {
    #[test]
    fn prop_symmetric(a in "\\PC{0,20}", b in "\\PC{0,20}") {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn prop_identity(a in "\\PC{0,30}") {
        prop_assert_eq!(levenshtein(&a, &a), 0);
    }

    #[test]
    fn prop_empty_is_char_count(a in "\\PC{0,30}") {
        prop_assert_eq!(levenshtein("", &a), a.chars().count());
        prop_assert_eq!(levenshtein(&a, ""), a.chars().count());
    }

    #[test]
    fn prop_triangle_inequality(
        a in "[a-e]{0,8}",
        b in "[a-e]{0,8}",
        c in "[a-e]{0,8}"
    ) {
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
    }

    #[test]
    fn prop_bounded_by_longer_length(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
        let distance = levenshtein(&a, &b);
        prop_assert!(distance <= a.len().max(b.len()));
        prop_assert!(distance >= a.len().abs_diff(b.len()));
    }
}
