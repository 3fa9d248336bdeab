//! In-process document store.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use super::{apply_upsert, Collection, DocumentStore, Record, StorageError, UpsertResult};

/// Document store holding every collection in memory.
///
/// Share one instance between several entity stores with `Arc` to model
/// several processes pointed at the same database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to seed a collection with records.
    pub fn with_records(self, collection: Collection, records: Vec<Record>) -> Self {
        {
            let mut collections = match self.collections.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            collections.entry(collection).or_default().extend(records);
        }
        self
    }
}

impl DocumentStore for MemoryStore {
    fn read_all(&self, collection: Collection) -> Result<Vec<Record>, StorageError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StorageError::LockPoisoned(collection))?;
        let records = collections.get(&collection).cloned().unwrap_or_default();
        debug!("Read {} records from memory {}", records.len(), collection);
        Ok(records)
    }

    fn upsert(
        &self,
        collection: Collection,
        criteria: &Record,
        record: &Record,
    ) -> Result<UpsertResult, StorageError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StorageError::LockPoisoned(collection))?;
        let records = collections.entry(collection).or_default();
        Ok(apply_upsert(records, criteria, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_empty_collection_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.read_all(Collection::Clans).unwrap().is_empty());
        assert!(store.find_one(Collection::Info).unwrap().is_none());
    }

    #[test]
    fn test_seeded_records_keep_order() {
        let store = MemoryStore::new().with_records(
            Collection::Players,
            vec![
                record(json!({"_id": "p1", "nick_name": "Sturg"})),
                record(json!({"_id": "p2", "nick_name": "Bill"})),
            ],
        );

        let players = store.read_all(Collection::Players).unwrap();
        assert_eq!(players[0]["_id"], json!("p1"));
        assert_eq!(players[1]["_id"], json!("p2"));
    }

    #[test]
    fn test_upsert_visible_to_later_reads() {
        let store = MemoryStore::new();
        let result = store
            .upsert(
                Collection::Clans,
                &record(json!({"_id": "c1"})),
                &record(json!({"clan_name": "Team Don", "member_ids": []})),
            )
            .unwrap();
        assert_eq!(result.inserted_id.unwrap().as_str(), "c1");

        store
            .upsert(
                Collection::Clans,
                &record(json!({"_id": "c1"})),
                &record(json!({"clan_name": "Team Donald"})),
            )
            .unwrap();

        let clans = store.read_all(Collection::Clans).unwrap();
        assert_eq!(clans.len(), 1);
        assert_eq!(clans[0]["clan_name"], json!("Team Donald"));
        assert_eq!(clans[0]["member_ids"], json!([]));
    }
}
