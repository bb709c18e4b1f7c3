//! Adapter over `indexset::BTreeMap`, a two-level B-tree.

use std::ops::Bound;
use std::sync::Arc;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue, IndexAdapter, IndexOperation, KeyColumn};

/// Two-level cache-friendly B-tree map. Unique keys, overwrite on duplicate.
#[derive(Debug)]
pub struct IndexsetBTreeMap<K: BenchKey, V> {
    map: indexset::BTreeMap<K, V>,
}

impl<K: BenchKey, V: BenchValue> IndexAdapter<K, V> for IndexsetBTreeMap<K, V> {
    fn name() -> &'static str {
        "Indexset B-Tree"
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
        false
    }

    fn create(_column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            map: indexset::BTreeMap::new(),
        }
    }

    fn bulk_load(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkLoad,
        ))
    }

    fn bulk_insert(&mut self, entries: &[(K, V)]) -> Result<(), BenchError> {
        for (key, value) in entries {
            self.map.insert(*key, *value);
        }
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
