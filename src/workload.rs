//! Workload generation: datasets and lookup lists.
//!
//! A [`Dataset`] is an immutable snapshot of one benchmark workload, built
//! deterministically from a persisted binary key file. Values are tuple
//! identifiers (tids): the 1-based position of each key, so the value at
//! index `i` is always `i + 1`. Tid 0 is reserved as "not found".
//!
//! Lookup workloads come from separate binary files: one equality probe per
//! record, and range bounds consumed pairwise with each pair reordered so
//! the lower bound comes first.

use std::path::Path;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue};

pub mod binary;
pub mod synthetic;

use binary::load_binary_file;

/// Immutable snapshot of a benchmark workload.
///
/// All four columns are parallel: `len(keys) == len(values) == len(entries)
/// == len(float_keys)`. The dataset is read-only for the duration of a run
/// and shared across all cases and iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<K, V> {
    /// Keys in load order, one per logical row.
    pub keys: Vec<K>,
    /// Tids parallel to `keys`; the value at index `i` is `i + 1`.
    pub values: Vec<V>,
    /// (key, tid) pairs zipped from `keys` and `values`.
    pub entries: Vec<(K, V)>,
    /// One single-element float vector per key, for structures that only
    /// accept floating-point coordinates. The cast is lossy above the
    /// exact-integer range of `f32`; see
    /// [`verify_float_round_trip`](Self::verify_float_round_trip).
    pub float_keys: Vec<[f32; 1]>,
}

impl<K: BenchKey, V: BenchValue> Dataset<K, V> {
    /// Derives a full dataset from a key sequence: tids, zipped entries and
    /// float-cast keys.
    #[must_use]
    pub fn from_keys(keys: Vec<K>) -> Self {
        let values: Vec<V> = (0..keys.len()).map(V::from_position).collect();
        let entries: Vec<(K, V)> = keys.iter().copied().zip(values.iter().copied()).collect();
        let float_keys: Vec<[f32; 1]> = keys.iter().map(|key| [key.as_f32()]).collect();
        Self {
            keys,
            values,
            entries,
            float_keys,
        }
    }

    /// Reads a length-prefixed binary key file and derives the dataset.
    ///
    /// # Errors
    ///
    /// [`BenchError::Io`] if the file cannot be opened,
    /// [`BenchError::MalformedWorkload`] if it is shorter than its record
    /// count promises.
    pub fn generate(path: &Path) -> Result<Self, BenchError> {
        let keys = load_binary_file::<K>(path)?;
        Ok(Self::from_keys(keys))
    }

    /// Number of rows in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Asserts that every key survives the narrowing cast to `f32`.
    ///
    /// Callers of float-only structures must run this before relying on
    /// their results; the cast is a documented fidelity limitation, not
    /// silently corrected.
    ///
    /// # Errors
    ///
    /// [`BenchError::MalformedWorkload`] naming the first key that does not
    /// round-trip.
    pub fn verify_float_round_trip(&self) -> Result<(), BenchError> {
        for (key, float_key) in self.keys.iter().zip(&self.float_keys) {
            if K::from_f32(float_key[0]) != *key {
                return Err(BenchError::MalformedWorkload(format!(
                    "key {key} does not survive the cast to f32 (became {})",
                    float_key[0]
                )));
            }
        }
        Ok(())
    }
}

/// A single equality probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualityLookup<K> {
    /// The key to probe.
    pub key: K,
}

/// An inclusive range probe with `lower_bound <= upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLookup<K> {
    /// Inclusive lower bound.
    pub lower_bound: K,
    /// Inclusive upper bound.
    pub upper_bound: K,
}

/// Reads one equality lookup per record of the binary file, in file order.
///
/// # Errors
///
/// [`BenchError::Io`] or [`BenchError::MalformedWorkload`] from the binary
/// loader.
pub fn generate_equality_lookups<K: BenchKey>(
    path: &Path,
) -> Result<Vec<EqualityLookup<K>>, BenchError> {
    let keys = load_binary_file::<K>(path)?;
    Ok(keys.into_iter().map(|key| EqualityLookup { key }).collect())
}

/// Consumes the binary file's records pairwise; every two consecutive values
/// form one range, reordered so the smaller value is the lower bound.
///
/// # Errors
///
/// [`BenchError::MalformedWorkload`] if the record count is odd (no unpaired
/// trailing value is allowed), plus the binary loader's errors.
pub fn generate_range_lookups<K: BenchKey>(
    path: &Path,
) -> Result<Vec<RangeLookup<K>>, BenchError> {
    let keys = load_binary_file::<K>(path)?;
    if keys.len() % 2 > 0 {
        return Err(BenchError::MalformedWorkload(format!(
            "cannot build ranges from {} values: an even number is required, \
             two consecutive values form one range",
            keys.len()
        )));
    }
    Ok(keys
        .chunks_exact(2)
        .map(|pair| RangeLookup {
            lower_bound: pair[0].min(pair[1]),
            upper_bound: pair[0].max(pair[1]),
        })
        .collect())
}
