//! The uniform operation contract every competing index structure satisfies.
//!
//! Each concrete adapter wraps one backing structure and declares statically
//! which operations it supports via [`IndexAdapter::supports`]. The
//! declaration must be exactly consistent with runtime behavior: an
//! unsupported operation returns [`BenchError::UnsupportedOperation`], it
//! never silently no-ops and never partially executes.
//!
//! Duplicate-key semantics differ by family and are deliberate:
//!
//! | Family | Adapters | On duplicate key |
//! |--------|----------|------------------|
//! | ordered tree | `BTreeMapIndex`, `IndexsetBTreeMap` | overwrite |
//! | hash map | `HashMapIndex`, `DashMapIndex` | overwrite |
//! | skip list | `SkipMapIndex` | overwrite |
//! | trie | `QpTrieIndex` | overwrite |
//! | sequence | `SimpleVectorIndex`, `SortedVectorIndex` | both entries kept |

use std::fmt as StdFmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::BenchError;

mod btree_map;
mod dash_map;
mod hash_map;
mod indexset_btree;
mod qp_trie;
mod simple_vector;
mod skip_map;
mod sorted_vector;

pub use btree_map::BTreeMapIndex;
pub use dash_map::DashMapIndex;
pub use hash_map::HashMapIndex;
pub use indexset_btree::IndexsetBTreeMap;
pub use qp_trie::QpTrieIndex;
pub use simple_vector::SimpleVectorIndex;
pub use skip_map::SkipMapIndex;
pub use sorted_vector::SortedVectorIndex;

/// The operations an index adapter may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexOperation {
    /// Populate an empty index from a full entry set.
    BulkLoad,
    /// Populate a possibly non-empty index from a full entry set.
    BulkInsert,
    /// Erase a full entry set.
    BulkErase,
    /// Insert a single entry.
    InsertEntry,
    /// Erase a single entry.
    EraseEntry,
    /// Look up all values stored under one key.
    EqualityLookup,
    /// Look up all values with keys in an inclusive range.
    RangeLookup,
}

impl IndexOperation {
    /// All operations, in contract order.
    pub const ALL: [Self; 7] = [
        Self::BulkLoad,
        Self::BulkInsert,
        Self::BulkErase,
        Self::InsertEntry,
        Self::EraseEntry,
        Self::EqualityLookup,
        Self::RangeLookup,
    ];
}

impl StdFmt::Display for IndexOperation {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        let name = match self {
            Self::BulkLoad => "BulkLoad",
            Self::BulkInsert => "BulkInsert",
            Self::BulkErase => "BulkErase",
            Self::InsertEntry => "InsertEntry",
            Self::EraseEntry => "EraseEntry",
            Self::EqualityLookup => "EqualityLookup",
            Self::RangeLookup => "RangeLookup",
        };
        f.write_str(name)
    }
}

/// Fixed-width unsigned key types the harness understands.
///
/// Keys are persisted as little-endian records of [`Self::ENCODED_LEN`]
/// bytes. The big-endian encoding exists for byte-ordered structures (the
/// trie adapter) where lexicographic byte order must match numeric order.
pub trait BenchKey:
    Copy + Ord + Eq + Hash + Default + StdFmt::Debug + StdFmt::Display + Send + Sync + 'static
{
    /// Width of one persisted key record in bytes.
    const ENCODED_LEN: usize;

    /// Decodes a key from exactly [`Self::ENCODED_LEN`] little-endian bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != Self::ENCODED_LEN`.
    fn decode(bytes: &[u8]) -> Self;

    /// Big-endian encoding, so that byte order equals numeric order.
    fn encode_be(self) -> Vec<u8>;

    /// Narrowing cast to `f32`. Lossy above the exact-integer range of
    /// `f32`; see [`crate::workload::Dataset::verify_float_round_trip`].
    fn as_f32(self) -> f32;

    /// Saturating cast back from `f32`, for round-trip verification.
    fn from_f32(value: f32) -> Self;

    /// Constructs a key from a small synthetic-generator value.
    fn from_u64(value: u64) -> Self;
}

impl BenchKey for u32 {
    const ENCODED_LEN: usize = 4;

    fn decode(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        Self::from_le_bytes(buf)
    }

    fn encode_be(self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }

    #[expect(clippy::cast_precision_loss, reason = "the narrowing cast is the documented contract")]
    fn as_f32(self) -> f32 {
        self as f32
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_f32(value: f32) -> Self {
        value as Self
    }

    #[expect(clippy::cast_possible_truncation)]
    fn from_u64(value: u64) -> Self {
        value as Self
    }
}

impl BenchKey for u64 {
    const ENCODED_LEN: usize = 8;

    fn decode(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Self::from_le_bytes(buf)
    }

    fn encode_be(self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }

    #[expect(clippy::cast_precision_loss, reason = "the narrowing cast is the documented contract")]
    fn as_f32(self) -> f32 {
        self as f32
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_f32(value: f32) -> Self {
        value as Self
    }

    fn from_u64(value: u64) -> Self {
        value
    }
}

/// Value types stored in the indexes.
///
/// Values are tuple identifiers (tids): 1-based positions into the original
/// key sequence. Tid 0 is reserved as "not found" by identifier-based
/// structures and is never produced.
pub trait BenchValue:
    Copy + Ord + Eq + Hash + StdFmt::Debug + StdFmt::Display + Send + Sync + 'static
{
    /// Builds the tid for the key at `position` (0-based). The result is
    /// always `position + 1`.
    fn from_position(position: usize) -> Self;

    /// The tid as a plain index-friendly integer.
    fn to_tid(self) -> usize;
}

impl BenchValue for u32 {
    #[expect(clippy::cast_possible_truncation, reason = "datasets never exceed u32 rows")]
    fn from_position(position: usize) -> Self {
        (position + 1) as Self
    }

    fn to_tid(self) -> usize {
        self as usize
    }
}

impl BenchValue for u64 {
    fn from_position(position: usize) -> Self {
        (position as Self) + 1
    }

    #[expect(clippy::cast_possible_truncation)]
    fn to_tid(self) -> usize {
        self as usize
    }
}

/// Read-only tid-to-key table for identifier-based structures.
///
/// The trie adapter stores only tids and recovers the indexed key by
/// position from this table. It is built once per benchmark run from the
/// dataset entries and handed to every adapter constructor; adapters that do
/// not resolve tids simply ignore it. Scoped to a single dataset, never
/// shared across independent runs.
#[derive(Debug)]
pub struct KeyColumn<K> {
    keys: Vec<K>,
}

impl<K: BenchKey> KeyColumn<K> {
    /// Builds the column from dataset entries.
    ///
    /// The column is sized by the maximum tid; cells without an entry keep
    /// the default key. All tids must be strictly positive.
    #[must_use]
    pub fn from_entries<V: BenchValue>(entries: &[(K, V)]) -> Self {
        let max_tid = entries
            .iter()
            .map(|(_, value)| value.to_tid())
            .max()
            .unwrap_or(0);
        let mut keys = vec![K::default(); max_tid];
        for (key, value) in entries {
            let tid = value.to_tid();
            debug_assert!(tid > 0, "tid 0 is reserved as 'not found'");
            keys[tid - 1] = *key;
        }
        Self { keys }
    }

    /// Returns the key stored under `tid`.
    ///
    /// # Panics
    ///
    /// Panics if `tid` is 0 or exceeds the column length.
    #[must_use]
    pub fn key_at(&self, tid: usize) -> K {
        self.keys[tid - 1]
    }

    /// Number of cells in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// The uniform capability contract every competing index type implements.
///
/// Contract highlights:
/// - [`supports`](Self::supports) must be exactly consistent with runtime
///   behavior: unsupported methods fail with
///   [`BenchError::UnsupportedOperation`].
/// - `equality_lookup` on an absent key returns an empty vec, never an
///   error. `erase` of an absent (key, value) pair is a no-op.
/// - `range_lookup` returns values ordered by ascending key, both bounds
///   inclusive.
/// - A fresh instance is constructed per benchmark iteration via
///   [`create`](Self::create); instances are never reused across iterations.
pub trait IndexAdapter<K: BenchKey, V: BenchValue>: Sized {
    /// Human-readable name of the backing structure, used in reports.
    fn name() -> &'static str;

    /// Whether `operation` is part of this adapter's capability set.
    fn supports(operation: IndexOperation) -> bool;

    /// Whether a second insert under an already-present key keeps both
    /// entries (`true`) or overwrites (`false`).
    fn supports_key_duplicates() -> bool;

    /// Whether `bulk_load` requires the caller to pre-sort the entries.
    fn requires_sorted_bulk_load() -> bool {
        false
    }

    /// Constructs a fresh, empty index. `column` is the read-only tid→key
    /// table; adapters without identifier-based storage ignore it.
    fn create(column: &Arc<KeyColumn<K>>) -> Self;

    /// Populates an empty index from a full entry set.
    ///
    /// # Errors
    ///
    /// [`BenchError::UnsupportedOperation`] if outside the capability set.
    fn bulk_load(&mut self, entries: &[(K, V)]) -> Result<(), BenchError>;

    /// Populates a possibly non-empty index from a full entry set.
    ///
    /// # Errors
    ///
    /// [`BenchError::UnsupportedOperation`] if outside the capability set.
    fn bulk_insert(&mut self, entries: &[(K, V)]) -> Result<(), BenchError>;

    /// Erases a full entry set.
    ///
    /// # Errors
    ///
    /// [`BenchError::UnsupportedOperation`] if outside the capability set.
    fn bulk_erase(&mut self, entries: &[(K, V)]) -> Result<(), BenchError>;

    /// Inserts a single entry.
    ///
    /// # Errors
    ///
    /// [`BenchError::UnsupportedOperation`] if outside the capability set.
    fn insert(&mut self, key: K, value: V) -> Result<(), BenchError>;

    /// Erases a single entry. Erasing an absent pair is a no-op.
    ///
    /// # Errors
    ///
    /// [`BenchError::UnsupportedOperation`] if outside the capability set.
    fn erase(&mut self, key: K, value: V) -> Result<(), BenchError>;

    /// Returns all values stored under `key`; empty on a miss.
    ///
    /// # Errors
    ///
    /// [`BenchError::UnsupportedOperation`] if outside the capability set.
    fn equality_lookup(&self, key: K) -> Result<Vec<V>, BenchError>;

    /// Returns the values of all entries with keys in `[lower, upper]`,
    /// ordered by ascending key.
    ///
    /// # Errors
    ///
    /// [`BenchError::UnsupportedOperation`] if outside the capability set.
    fn range_lookup(&self, lower: K, upper: K) -> Result<Vec<V>, BenchError>;
}
