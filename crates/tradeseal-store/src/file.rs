//! JSON-file-backed record store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tradeseal_canonical::{Record, RecordId};

use crate::error::StoreError;
use crate::RecordStore;

/// Record store loaded from a JSON file.
///
/// The file holds an array of records:
/// `[{"record_id": 42, "fields": {"kwh": 10.5, ...}}, ...]`.
/// Contents are read once at open; this models the record-keeper handing a
/// snapshot of its database to the audit tooling.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    records: BTreeMap<RecordId, Record>,
}

impl JsonFileStore {
    /// Loads a record snapshot from a JSON file.
    ///
    /// Fails if two records share an identifier: record identifiers are
    /// assigned once and never reused, so a colliding snapshot is corrupt.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path)?;
        let parsed: Vec<Record> = serde_json::from_str(&contents)?;

        let mut records = BTreeMap::new();
        for record in parsed {
            let id = record.record_id;
            if records.insert(id, record).is_some() {
                return Err(StoreError::Other(format!(
                    "duplicate record id {} in snapshot",
                    id
                )));
            }
        }
        Ok(Self { records })
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for JsonFileStore {
    fn get_record(&self, record_id: RecordId) -> Result<Option<Record>, StoreError> {
        Ok(self.records.get(&record_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_records_from_a_snapshot() {
        let file = snapshot(
            r#"[
                {"record_id": 42, "fields": {"kwh": 10.5, "buyer": "B"}},
                {"record_id": 43, "fields": {"kwh": 3.0, "buyer": "C"}}
            ]"#,
        );
        let store = JsonFileStore::open(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        let record = store.get_record(RecordId::new(42)).unwrap().unwrap();
        assert_eq!(record.fields["buyer"], "B");
        assert!(store.get_record(RecordId::new(99)).unwrap().is_none());
    }

    #[test]
    fn rejects_snapshots_with_colliding_identifiers() {
        let file = snapshot(
            r#"[
                {"record_id": 1, "fields": {}},
                {"record_id": 1, "fields": {}}
            ]"#,
        );
        assert!(matches!(
            JsonFileStore::open(file.path()),
            Err(StoreError::Other(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = snapshot("not json");
        assert!(matches!(
            JsonFileStore::open(file.path()),
            Err(StoreError::Parse(_))
        ));
    }
}
