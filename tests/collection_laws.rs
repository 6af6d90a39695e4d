#![cfg(feature = "collection")]
//! Property-based tests for the collection algorithms.
//!
//! This module verifies that:
//!
//! - **Traversal**: `each` visits every element once, in index order
//! - **Folding**: `reduce` agrees with a left fold over the elements
//! - **Partition**: `filter` and `reject` split a collection exactly
//! - **Uniqueness**: `uniq` output has no duplicates and loses no value
//! - **Permutation**: `shuffle` only reorders
//! - **Sorting**: `sort_by` orders by key and is stable

use lambdash::collection::{
    Mapping, contains, difference, each, filter, intersection, map, reduce, reject, shuffle,
    sort_by, uniq,
};
use proptest::prelude::*;

// =============================================================================
// Traversal Law
// =============================================================================

proptest! {
    /// each visits indices 0..len exactly once, ascending
    #[test]
    fn prop_each_visits_every_index_in_order(elements in prop::collection::vec(any::<i16>(), 0..64)) {
        let mut visited = Vec::new();
        each(&elements, |element, key, _| visited.push((key.as_index(), *element)));

        let expected: Vec<_> = elements
            .iter()
            .enumerate()
            .map(|(index, element)| (Some(index), *element))
            .collect();
        prop_assert_eq!(visited, expected);
    }
}

proptest! {
    /// each visits every mapping entry exactly once
    #[test]
    fn prop_each_visits_every_mapping_entry(entries in prop::collection::btree_map("[a-z]{1,6}", any::<u8>(), 0..32)) {
        let entries: Mapping<u8> = entries;
        let mut names = Vec::new();
        each(&entries, |_, key, _| names.push(key.as_name().map(str::to_owned)));

        prop_assert_eq!(names.len(), entries.len());
        let expected: Vec<_> = entries.keys().cloned().map(Some).collect();
        prop_assert_eq!(names, expected);
    }
}

// =============================================================================
// Folding Law
// =============================================================================

proptest! {
    /// reduce is a strict left fold
    #[test]
    fn prop_reduce_is_left_fold(elements in prop::collection::vec(any::<i32>(), 0..64), seed in any::<i32>()) {
        let folded = reduce(&elements, seed, |accumulator, element| accumulator.wrapping_mul(31).wrapping_add(*element));
        let expected = elements
            .iter()
            .fold(seed, |accumulator, element| accumulator.wrapping_mul(31).wrapping_add(*element));
        prop_assert_eq!(folded, expected);
    }
}

// =============================================================================
// Partition Law
// =============================================================================

proptest! {
    /// filter and reject together keep every element exactly once
    #[test]
    fn prop_filter_reject_partition(elements in prop::collection::vec(any::<i32>(), 0..64), divisor in 1_i32..8) {
        let kept = filter(&elements, |element| element % divisor == 0);
        let dropped = reject(&elements, |element| element % divisor == 0);

        prop_assert_eq!(kept.len() + dropped.len(), elements.len());
        prop_assert!(kept.iter().all(|element| element % divisor == 0));
        prop_assert!(dropped.iter().all(|element| element % divisor != 0));

        let mut combined = [kept, dropped].concat();
        let mut original = elements.clone();
        combined.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(combined, original);
    }
}

proptest! {
    /// map preserves length and order
    #[test]
    fn prop_map_preserves_order(elements in prop::collection::vec(any::<i32>(), 0..64)) {
        let doubled = map(&elements, |element| i64::from(*element) * 2);
        let expected: Vec<i64> = elements.iter().map(|element| i64::from(*element) * 2).collect();
        prop_assert_eq!(doubled, expected);
    }
}

// =============================================================================
// Uniqueness Law
// =============================================================================

proptest! {
    /// uniq keeps one of each value, in first-occurrence order
    #[test]
    fn prop_uniq_has_no_duplicates(elements in prop::collection::vec(0_u8..16, 0..64)) {
        let unique = uniq(&elements);

        for (index, element) in unique.iter().enumerate() {
            prop_assert!(!contains(&unique[index + 1..], element));
        }
        for element in &elements {
            prop_assert!(contains(&unique, element));
        }

        let positions: Vec<_> = unique
            .iter()
            .filter_map(|element| elements.iter().position(|candidate| candidate == element))
            .collect();
        let mut sorted_positions = positions.clone();
        sorted_positions.sort_unstable();
        prop_assert_eq!(positions, sorted_positions);
    }
}

proptest! {
    /// Everything in the intersection is in every input
    #[test]
    fn prop_intersection_is_shared(
        left in prop::collection::vec(0_u8..12, 0..24),
        right in prop::collection::vec(0_u8..12, 0..24),
    ) {
        let shared = intersection(&[left.clone(), right.clone()]);
        for element in &shared {
            prop_assert!(contains(&left, element));
            prop_assert!(contains(&right, element));
        }
        let rest = difference(&left, &[right.clone()]);
        for element in &rest {
            prop_assert!(!contains(&right, element));
        }
    }
}

// =============================================================================
// Permutation Law
// =============================================================================

proptest! {
    /// shuffle returns a permutation and leaves the input unchanged
    #[test]
    fn prop_shuffle_is_permutation(elements in prop::collection::vec(any::<i32>(), 0..64)) {
        let snapshot = elements.clone();
        let mut shuffled = shuffle(&elements);

        prop_assert_eq!(&elements, &snapshot);
        let mut original = elements;
        shuffled.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(shuffled, original);
    }
}

// =============================================================================
// Sorting Law
// =============================================================================

proptest! {
    /// sort_by orders by key and keeps equal keys in input order
    #[test]
    fn prop_sort_by_is_stable(elements in prop::collection::vec((0_u8..4, any::<u16>()), 0..64)) {
        let sorted = sort_by(&elements, |(key, _)| *key);

        let mut expected = elements.clone();
        expected.sort_by_key(|(key, _)| *key);
        prop_assert_eq!(sorted, expected);
    }
}
