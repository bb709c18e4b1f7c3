//! Sorted vector baseline with binary search.

use std::sync::Arc;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue, IndexAdapter, IndexOperation, KeyColumn};

/// Vector of entries kept sorted by (key, value). Tolerates duplicate keys;
/// lookups binary-search the key range. Point inserts shift the tail, which
/// makes them expensive on large datasets.
#[derive(Debug)]
pub struct SortedVectorIndex<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: BenchKey, V: BenchValue> SortedVectorIndex<K, V> {
    fn collect_range(&self, lower: K, upper: K) -> Vec<V> {
        let start = self.entries.partition_point(|(key, _)| *key < lower);
        self.entries[start..]
            .iter()
            .take_while(|(key, _)| *key <= upper)
            .map(|(_, value)| *value)
            .collect()
    }
}

impl<K: BenchKey, V: BenchValue> IndexAdapter<K, V> for SortedVectorIndex<K, V> {
    fn name() -> &'static str {
        "Sorted Vector"
    }

    fn supports(operation: IndexOperation) -> bool {
        match operation {
            IndexOperation::BulkInsert
            | IndexOperation::InsertEntry
            | IndexOperation::EraseEntry
            | IndexOperation::EqualityLookup
            | IndexOperation::RangeLookup => true,
            IndexOperation::BulkLoad | IndexOperation::BulkErase => false,
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
        self.entries.sort_unstable();
        Ok(())
    }

    fn bulk_erase(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkErase,
        ))
    }

    fn insert(&mut self, key: K, value: V) -> Result<(), BenchError> {
        let position = self.entries.partition_point(|(stored, _)| *stored <= key);
        self.entries.insert(position, (key, value));
        Ok(())
    }

    fn erase(&mut self, key: K, value: V) -> Result<(), BenchError> {
        let target = (key, value);
        if let Ok(position) = self.entries.binary_search(&target) {
            self.entries.remove(position);
        }
        Ok(())
    }

    fn equality_lookup(&self, key: K) -> Result<Vec<V>, BenchError> {
        Ok(self.collect_range(key, key))
    }

    fn range_lookup(&self, lower: K, upper: K) -> Result<Vec<V>, BenchError> {
        Ok(self.collect_range(lower, upper))
    }
}
