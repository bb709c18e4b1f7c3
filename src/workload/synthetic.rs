//! Synthetic key generation for ad hoc runs.
//!
//! A secondary, non-file-based workload source: uniformly distributed keys
//! over a small fixed range, either duplicate-free or duplicate-tolerant.
//! Generation is seeded and fully deterministic so runs stay reproducible.

use std::collections::HashSet;

use crate::error::BenchError;
use crate::index::BenchKey;

/// Inclusive bounds of the uniform key range.
const RANGE_MIN: u64 = 1;
const RANGE_MAX: u64 = 50;

/// splitmix64; deterministic across runs and platforms.
#[derive(Debug, Clone)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn next_in_range(&mut self) -> u64 {
        RANGE_MIN + self.next() % (RANGE_MAX - RANGE_MIN + 1)
    }
}

/// Generates `count` uniformly distributed keys in `1..=50`.
///
/// With `unique_keys_required`, keys are drawn by set-based rejection
/// sampling until the target cardinality is reached; otherwise the raw
/// (possibly duplicated) draws are returned in draw order.
///
/// # Errors
///
/// [`BenchError::Configuration`] if `unique_keys_required` and `count`
/// exceeds the range cardinality, which would loop forever.
pub fn generate_uniform_keys<K: BenchKey>(
    seed: u64,
    count: usize,
    unique_keys_required: bool,
) -> Result<Vec<K>, BenchError> {
    let mut rng = SplitMix64::new(seed);

    if unique_keys_required {
        let cardinality = usize::try_from(RANGE_MAX - RANGE_MIN + 1).unwrap_or(usize::MAX);
        if count > cardinality {
            return Err(BenchError::Configuration(format!(
                "cannot draw {count} unique keys from a range of {cardinality} values"
            )));
        }
        let mut seen = HashSet::with_capacity(count);
        let mut keys = Vec::with_capacity(count);
        while keys.len() < count {
            let candidate = rng.next_in_range();
            if seen.insert(candidate) {
                keys.push(K::from_u64(candidate));
            }
        }
        Ok(keys)
    } else {
        Ok((0..count).map(|_| K::from_u64(rng.next_in_range())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_keys() {
        let a = generate_uniform_keys::<u64>(7, 100, false).unwrap();
        let b = generate_uniform_keys::<u64>(7, 100, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn keys_stay_in_range() {
        let keys = generate_uniform_keys::<u32>(42, 500, false).unwrap();
        assert!(keys.iter().all(|key| (1..=50).contains(key)));
    }

    #[test]
    fn unique_generation_reaches_the_target_cardinality() {
        let keys = generate_uniform_keys::<u64>(3, 50, true).unwrap();
        let distinct: HashSet<u64> = keys.iter().copied().collect();
        assert_eq!(distinct.len(), 50);
    }

    #[test]
    fn impossible_unique_cardinality_is_rejected() {
        assert!(matches!(
            generate_uniform_keys::<u64>(3, 51, true),
            Err(BenchError::Configuration(_))
        ));
    }
}
