//! Property-based tests for workloads and ordered adapters.
//!
//! Ordered adapters are tested differentially against `BTreeMap` as an
//! oracle, on unique keys so both duplicate policies agree.

#![expect(clippy::unwrap_used, reason = "fail fast in tests")]

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;

use imibench::index::{
    BTreeMapIndex, IndexAdapter, IndexsetBTreeMap, KeyColumn, SkipMapIndex, SortedVectorIndex,
};
use imibench::workload::Dataset;

// ============================================================================
//  Strategies
// ============================================================================

/// A sequence of unique keys, dataset-sized for fast shrinking.
fn unique_keys(max_count: usize) -> impl Strategy<Value = Vec<u64>> {
    prop::collection::hash_set(1u64..1_000_000, 0..=max_count)
        .prop_map(|set| set.into_iter().collect())
}

fn entries_from(keys: &[u64]) -> Vec<(u64, u64)> {
    keys.iter()
        .enumerate()
        .map(|(position, key)| (*key, position as u64 + 1))
        .collect()
}

fn build<A: IndexAdapter<u64, u64>>(entries: &[(u64, u64)]) -> A {
    let column = Arc::new(KeyColumn::from_entries(entries));
    let mut index = A::create(&column);
    for (key, value) in entries {
        index.insert(*key, *value).unwrap();
    }
    index
}

// ============================================================================
//  Dataset invariants
// ============================================================================

proptest! {
    #[test]
    fn dataset_columns_stay_parallel(keys in prop::collection::vec(any::<u64>(), 0..256)) {
        let dataset: Dataset<u64, u64> = Dataset::from_keys(keys.clone());
        prop_assert_eq!(dataset.len(), keys.len());
        prop_assert_eq!(dataset.values.len(), keys.len());
        prop_assert_eq!(dataset.entries.len(), keys.len());
        prop_assert_eq!(dataset.float_keys.len(), keys.len());
        for (position, (key, value)) in dataset.entries.iter().enumerate() {
            prop_assert_eq!(*key, keys[position]);
            prop_assert_eq!(*value, position as u64 + 1);
        }
    }

    #[test]
    fn dataset_tids_are_positive(keys in prop::collection::vec(any::<u64>(), 0..256)) {
        let dataset: Dataset<u64, u64> = Dataset::from_keys(keys);
        prop_assert!(dataset.values.iter().all(|value| *value > 0));
    }
}

// ============================================================================
//  Differential testing against BTreeMap
// ============================================================================

fn check_against_oracle<A: IndexAdapter<u64, u64>>(
    keys: &[u64],
    probes: &[u64],
) -> Result<(), TestCaseError> {
    let entries = entries_from(keys);
    let index = build::<A>(&entries);
    let oracle: BTreeMap<u64, u64> = entries.iter().copied().collect();

    for probe in probes {
        let expected: Vec<u64> = oracle.get(probe).copied().into_iter().collect();
        prop_assert_eq!(index.equality_lookup(*probe).unwrap(), expected);
    }
    Ok(())
}

fn check_ranges_against_oracle<A: IndexAdapter<u64, u64>>(
    keys: &[u64],
    bounds: &[(u64, u64)],
) -> Result<(), TestCaseError> {
    let entries = entries_from(keys);
    let index = build::<A>(&entries);
    let oracle: BTreeMap<u64, u64> = entries.iter().copied().collect();

    for (a, b) in bounds {
        let (lower, upper) = (*a.min(b), *a.max(b));
        let expected: Vec<u64> = oracle.range(lower..=upper).map(|(_, value)| *value).collect();
        prop_assert_eq!(index.range_lookup(lower, upper).unwrap(), expected);
    }
    Ok(())
}

fn check_erase_against_oracle<A: IndexAdapter<u64, u64>>(
    keys: &[u64],
    erase_count: usize,
) -> Result<(), TestCaseError> {
    let entries = entries_from(keys);
    let mut index = build::<A>(&entries);
    let mut oracle: BTreeMap<u64, u64> = entries.iter().copied().collect();

    for (key, value) in entries.iter().take(erase_count) {
        index.erase(*key, *value).unwrap();
        oracle.remove(key);
    }
    for key in keys {
        let expected: Vec<u64> = oracle.get(key).copied().into_iter().collect();
        prop_assert_eq!(index.equality_lookup(*key).unwrap(), expected);
    }
    Ok(())
}

proptest! {
    #[test]
    fn btree_adapter_matches_oracle(
        keys in unique_keys(128),
        probes in prop::collection::vec(1u64..1_000_000, 0..64),
    ) {
        check_against_oracle::<BTreeMapIndex<u64, u64>>(&keys, &probes)?;
    }

    #[test]
    fn indexset_adapter_matches_oracle(
        keys in unique_keys(128),
        probes in prop::collection::vec(1u64..1_000_000, 0..64),
    ) {
        check_against_oracle::<IndexsetBTreeMap<u64, u64>>(&keys, &probes)?;
    }

    #[test]
    fn skip_map_adapter_matches_oracle(
        keys in unique_keys(128),
        probes in prop::collection::vec(1u64..1_000_000, 0..64),
    ) {
        check_against_oracle::<SkipMapIndex<u64, u64>>(&keys, &probes)?;
    }

    #[test]
    fn sorted_vector_adapter_matches_oracle(
        keys in unique_keys(128),
        probes in prop::collection::vec(1u64..1_000_000, 0..64),
    ) {
        check_against_oracle::<SortedVectorIndex<u64, u64>>(&keys, &probes)?;
    }

    #[test]
    fn btree_adapter_ranges_match_oracle(
        keys in unique_keys(128),
        bounds in prop::collection::vec((1u64..1_000_000, 1u64..1_000_000), 0..32),
    ) {
        check_ranges_against_oracle::<BTreeMapIndex<u64, u64>>(&keys, &bounds)?;
    }

    #[test]
    fn skip_map_adapter_ranges_match_oracle(
        keys in unique_keys(128),
        bounds in prop::collection::vec((1u64..1_000_000, 1u64..1_000_000), 0..32),
    ) {
        check_ranges_against_oracle::<SkipMapIndex<u64, u64>>(&keys, &bounds)?;
    }

    #[test]
    fn sorted_vector_adapter_ranges_match_oracle(
        keys in unique_keys(128),
        bounds in prop::collection::vec((1u64..1_000_000, 1u64..1_000_000), 0..32),
    ) {
        check_ranges_against_oracle::<SortedVectorIndex<u64, u64>>(&keys, &bounds)?;
    }

    #[test]
    fn btree_adapter_erases_match_oracle(
        keys in unique_keys(128),
        erase_count in 0usize..64,
    ) {
        check_erase_against_oracle::<BTreeMapIndex<u64, u64>>(&keys, erase_count)?;
    }

    #[test]
    fn sorted_vector_adapter_erases_match_oracle(
        keys in unique_keys(128),
        erase_count in 0usize..64,
    ) {
        check_erase_against_oracle::<SortedVectorIndex<u64, u64>>(&keys, erase_count)?;
    }
}
