//! Append-only vector baseline.

use std::sync::Arc;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue, IndexAdapter, IndexOperation, KeyColumn};

/// Unsorted append-only vector of entries, searched linearly. The lowest
/// baseline in the roster. Tolerates duplicate keys; equality lookups return
/// all matching values in insertion order.
#[derive(Debug)]
pub struct SimpleVectorIndex<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: BenchKey, V: BenchValue> IndexAdapter<K, V> for SimpleVectorIndex<K, V> {
    fn name() -> &'static str {
        "Simple Vector"
    }

    fn supports(operation: IndexOperation) -> bool {
        match operation {
            IndexOperation::BulkInsert
            | IndexOperation::InsertEntry
            | IndexOperation::EraseEntry
            | IndexOperation::EqualityLookup => true,
            IndexOperation::BulkLoad
            | IndexOperation::BulkErase
            | IndexOperation::RangeLookup => false,
        }
    }

    fn supports_key_duplicates() -> bool {
        true
    }

    fn create(_column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn bulk_load(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkLoad,
        ))
    }

    fn bulk_insert(&mut self, entries: &[(K, V)]) -> Result<(), BenchError> {
        self.entries.extend_from_slice(entries);
        Ok(())
    }

    fn bulk_erase(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkErase,
        ))
    }

    fn insert(&mut self, key: K, value: V) -> Result<(), BenchError> {
        self.entries.push((key, value));
        Ok(())
    }

    // prerequisite: stored values are unique tuple positions, so matching on
    // the value alone identifies the entry.
    fn erase(&mut self, _key: K, value: V) -> Result<(), BenchError> {
        self.entries.retain(|(_, stored)| *stored != value);
        Ok(())
    }

    fn equality_lookup(&self, key: K) -> Result<Vec<V>, BenchError> {
        Ok(self
            .entries
            .iter()
            .filter(|(stored, _)| *stored == key)
            .map(|(_, value)| *value)
            .collect())
    }

    fn range_lookup(&self, _lower: K, _upper: K) -> Result<Vec<V>, BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::RangeLookup,
        ))
    }
}
