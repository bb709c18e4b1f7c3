//! Quick adapter comparison benchmarks, independent of the workload files.
//!
//! **Methodology:**
//! - Identical deterministic key generation for every adapter
//! - Pre-built inputs so only the operation under test is timed
//! - Multiple dataset sizes to capture scaling behavior
//!
//! Run with: `cargo bench --bench adapters`

#![expect(clippy::unwrap_used)]

use std::sync::Arc;

use divan::{Bencher, black_box};
use imibench::index::{
    BTreeMapIndex, DashMapIndex, HashMapIndex, IndexAdapter, IndexsetBTreeMap, KeyColumn,
    SkipMapIndex, SortedVectorIndex,
};

fn main() {
    divan::main();
}

const SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Deterministic pseudo-random entries; tids are positional.
fn entries(n: usize) -> Vec<(u64, u64)> {
    (0..n)
        .map(|i| {
            let key = (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) >> 16;
            (key, i as u64 + 1)
        })
        .collect()
}

fn setup<A: IndexAdapter<u64, u64>>(entries: &[(u64, u64)]) -> A {
    let column = Arc::new(KeyColumn::from_entries(entries));
    let mut index = A::create(&column);
    index.bulk_insert(entries).unwrap();
    index
}

// =============================================================================
// Bulk insert
// =============================================================================

#[divan::bench_group(name = "01_bulk_insert")]
mod bulk_insert {
    use super::{
        Arc, BTreeMapIndex, Bencher, DashMapIndex, HashMapIndex, IndexAdapter, IndexsetBTreeMap,
        KeyColumn, SIZES, SkipMapIndex, SortedVectorIndex, black_box, entries,
    };

    fn run<A: IndexAdapter<u64, u64>>(bencher: Bencher, n: usize) {
        let data = entries(n);
        let column = Arc::new(KeyColumn::from_entries(&data));
        bencher
            .with_inputs(|| A::create(&column))
            .bench_local_values(|mut index| {
                index.bulk_insert(black_box(&data)).unwrap();
                index
            });
    }

    #[divan::bench(args = SIZES)]
    fn btree_map(bencher: Bencher, n: usize) {
        run::<BTreeMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn indexset_btree(bencher: Bencher, n: usize) {
        run::<IndexsetBTreeMap<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn hash_map(bencher: Bencher, n: usize) {
        run::<HashMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn dash_map(bencher: Bencher, n: usize) {
        run::<DashMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn skip_map(bencher: Bencher, n: usize) {
        run::<SkipMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn sorted_vector(bencher: Bencher, n: usize) {
        run::<SortedVectorIndex<u64, u64>>(bencher, n);
    }
}

// =============================================================================
// Equality lookup
// =============================================================================

#[divan::bench_group(name = "02_equality_lookup")]
mod equality_lookup {
    use super::{
        BTreeMapIndex, Bencher, DashMapIndex, HashMapIndex, IndexAdapter, IndexsetBTreeMap, SIZES,
        SkipMapIndex, SortedVectorIndex, black_box, entries, setup,
    };

    fn run<A: IndexAdapter<u64, u64>>(bencher: Bencher, n: usize) {
        let data = entries(n);
        let index = setup::<A>(&data);
        bencher.bench_local(|| {
            for (key, _) in &data {
                black_box(index.equality_lookup(black_box(*key)).unwrap());
            }
        });
    }

    #[divan::bench(args = SIZES)]
    fn btree_map(bencher: Bencher, n: usize) {
        run::<BTreeMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn indexset_btree(bencher: Bencher, n: usize) {
        run::<IndexsetBTreeMap<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn hash_map(bencher: Bencher, n: usize) {
        run::<HashMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn dash_map(bencher: Bencher, n: usize) {
        run::<DashMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn skip_map(bencher: Bencher, n: usize) {
        run::<SkipMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn sorted_vector(bencher: Bencher, n: usize) {
        run::<SortedVectorIndex<u64, u64>>(bencher, n);
    }
}

// =============================================================================
// Range lookup
// =============================================================================

#[divan::bench_group(name = "03_range_lookup")]
mod range_lookup {
    use super::{
        BTreeMapIndex, Bencher, IndexAdapter, IndexsetBTreeMap, SIZES, SkipMapIndex,
        SortedVectorIndex, black_box, entries, setup,
    };

    fn run<A: IndexAdapter<u64, u64>>(bencher: Bencher, n: usize) {
        let data = entries(n);
        let index = setup::<A>(&data);
        let bounds: Vec<(u64, u64)> = data
            .iter()
            .step_by(16)
            .map(|(key, _)| (*key, key.saturating_add(1 << 20)))
            .collect();
        bencher.bench_local(|| {
            for (lower, upper) in &bounds {
                black_box(
                    index
                        .range_lookup(black_box(*lower), black_box(*upper))
                        .unwrap(),
                );
            }
        });
    }

    #[divan::bench(args = SIZES)]
    fn btree_map(bencher: Bencher, n: usize) {
        run::<BTreeMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn indexset_btree(bencher: Bencher, n: usize) {
        run::<IndexsetBTreeMap<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn skip_map(bencher: Bencher, n: usize) {
        run::<SkipMapIndex<u64, u64>>(bencher, n);
    }

    #[divan::bench(args = SIZES)]
    fn sorted_vector(bencher: Bencher, n: usize) {
        run::<SortedVectorIndex<u64, u64>>(bencher, n);
    }
}
