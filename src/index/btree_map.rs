//! Adapter over `std::collections::BTreeMap`.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue, IndexAdapter, IndexOperation, KeyColumn};

/// The standard library B-tree map. Unique keys, overwrite on duplicate.
///
/// The only adapter in the roster with a bulk-load path: building from a
/// pre-sorted entry set lets the B-tree be assembled bottom-up, so
/// [`IndexAdapter::requires_sorted_bulk_load`] is `true`.
#[derive(Debug)]
pub struct BTreeMapIndex<K, V> {
    map: BTreeMap<K, V>,
}

impl<K: BenchKey, V: BenchValue> IndexAdapter<K, V> for BTreeMapIndex<K, V> {
    fn name() -> &'static str {
        "STD B-Tree Map"
    }

    fn supports(operation: IndexOperation) -> bool {
        match operation {
            IndexOperation::BulkLoad
            | IndexOperation::BulkInsert
            | IndexOperation::InsertEntry
            | IndexOperation::EraseEntry
            | IndexOperation::EqualityLookup
            | IndexOperation::RangeLookup => true,
            IndexOperation::BulkErase => false,
        }
    }

    fn supports_key_duplicates() -> bool {
        false
    }

    fn requires_sorted_bulk_load() -> bool {
        true
    }

    fn create(_column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    // sorted entries are required!
    fn bulk_load(&mut self, entries: &[(K, V)]) -> Result<(), BenchError> {
        self.map = entries.iter().copied().collect();
        Ok(())
    }

    fn bulk_insert(&mut self, entries: &[(K, V)]) -> Result<(), BenchError> {
        self.map.extend(entries.iter().copied());
        Ok(())
    }

    fn bulk_erase(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkErase,
        ))
    }

    fn insert(&mut self, key: K, value: V) -> Result<(), BenchError> {
        self.map.insert(key, value);
        Ok(())
    }

    fn erase(&mut self, key: K, _value: V) -> Result<(), BenchError> {
        self.map.remove(&key);
        Ok(())
    }

    fn equality_lookup(&self, key: K) -> Result<Vec<V>, BenchError> {
        Ok(self.map.get(&key).map(|value| vec![*value]).unwrap_or_default())
    }

    fn range_lookup(&self, lower: K, upper: K) -> Result<Vec<V>, BenchError> {
        let range = (Bound::Included(lower), Bound::Included(upper));
        Ok(self.map.range(range).map(|(_, value)| *value).collect())
    }
}
