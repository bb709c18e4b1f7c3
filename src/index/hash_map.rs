//! Adapter over `std::collections::HashMap`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue, IndexAdapter, IndexOperation, KeyColumn};

/// The standard library hash map. Unique keys, overwrite on duplicate, no
/// key order and therefore no range lookups.
#[derive(Debug)]
pub struct HashMapIndex<K, V> {
    map: HashMap<K, V>,
}

impl<K: BenchKey, V: BenchValue> IndexAdapter<K, V> for HashMapIndex<K, V> {
    fn name() -> &'static str {
        "STD Hash Map"
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
        false
    }

    fn create(_column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    fn bulk_load(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkLoad,
        ))
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

    fn range_lookup(&self, _lower: K, _upper: K) -> Result<Vec<V>, BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::RangeLookup,
        ))
    }
}
