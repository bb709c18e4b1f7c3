//! Adapter over `qp_trie::Trie`, the trie-family competitor.
//!
//! Like the identifier-based structures it represents, this adapter stores
//! tids and recovers the indexed key by position from the shared
//! [`KeyColumn`] handed to its constructor. Keys enter the trie in
//! big-endian byte order so lexicographic order matches numeric order.

use std::sync::Arc;

use qp_trie::Trie;

use crate::error::BenchError;
use crate::index::{BenchKey, BenchValue, IndexAdapter, IndexOperation, KeyColumn};

/// A QP-trie keyed by big-endian key bytes, storing tids. Unique keys,
/// overwrite on duplicate. No bulk paths and no range lookups.
pub struct QpTrieIndex<K, V> {
    trie: Trie<Vec<u8>, V>,
    column: Arc<KeyColumn<K>>,
}

impl<K: BenchKey, V: BenchValue> IndexAdapter<K, V> for QpTrieIndex<K, V> {
    fn name() -> &'static str {
        "QP Trie"
    }

    fn supports(operation: IndexOperation) -> bool {
        match operation {
            IndexOperation::InsertEntry
            | IndexOperation::EraseEntry
            | IndexOperation::EqualityLookup => true,
            IndexOperation::BulkLoad
            | IndexOperation::BulkInsert
            | IndexOperation::BulkErase
            | IndexOperation::RangeLookup => false,
        }
    }

    fn supports_key_duplicates() -> bool {
        false
    }

    fn create(column: &Arc<KeyColumn<K>>) -> Self {
        Self {
            trie: Trie::new(),
            column: Arc::clone(column),
        }
    }

    fn bulk_load(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkLoad,
        ))
    }

    fn bulk_insert(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkInsert,
        ))
    }

    fn bulk_erase(&mut self, _entries: &[(K, V)]) -> Result<(), BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::BulkErase,
        ))
    }

    // the indexed key is resolved from the column by tid, exercising the
    // identifier-based load path of the backing structure.
    fn insert(&mut self, _key: K, value: V) -> Result<(), BenchError> {
        let key = self.column.key_at(value.to_tid());
        self.trie.insert(key.encode_be(), value);
        Ok(())
    }

    fn erase(&mut self, key: K, _value: V) -> Result<(), BenchError> {
        let bytes = key.encode_be();
        self.trie.remove(&bytes[..]);
        Ok(())
    }

    fn equality_lookup(&self, key: K) -> Result<Vec<V>, BenchError> {
        let bytes = key.encode_be();
        Ok(self
            .trie
            .get(&bytes[..])
            .map(|value| vec![*value])
            .unwrap_or_default())
    }

    fn range_lookup(&self, _lower: K, _upper: K) -> Result<Vec<V>, BenchError> {
        Err(BenchError::unsupported(
            <Self as IndexAdapter<K, V>>::name(),
            IndexOperation::RangeLookup,
        ))
    }
}
