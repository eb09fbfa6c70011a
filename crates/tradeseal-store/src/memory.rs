//! In-memory record store.

use std::collections::BTreeMap;

use tradeseal_canonical::{Record, RecordId};

use crate::error::StoreError;
use crate::RecordStore;

/// Map-backed record store for tests and embedding.
///
/// Mutation lives here with the store owner; the reconciliation core only
/// sees the read-only [`RecordStore`] view.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<RecordId, Record>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record.
    pub fn put_record(&mut self, record: Record) {
        self.records.insert(record.record_id, record);
    }

    /// Removes a record, returning it if present.
    pub fn remove_record(&mut self, record_id: RecordId) -> Option<Record> {
        self.records.remove(&record_id)
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get_record(&self, record_id: RecordId) -> Result<Option<Record>, StoreError> {
        Ok(self.records.get(&record_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn get_returns_none_for_missing_records() {
        let store = MemoryStore::new();
        assert!(store.get_record(RecordId::new(1)).unwrap().is_none());
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut store = MemoryStore::new();
        let mut fields = Map::new();
        fields.insert("kwh".to_string(), json!(10.5));
        let record = Record::new(RecordId::new(42), fields);
        store.put_record(record.clone());
        assert_eq!(store.get_record(RecordId::new(42)).unwrap(), Some(record));
    }
}
