//! Per-entity serialization contract.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{Collection, Record, ID_FIELD};
use crate::models::EntityId;

/// An entity that lives in a collection of the pool database.
///
/// `FIELDS` is the complete list of keys written back on save; anything
/// else on the struct (ids, cached state) stays out of the stored record.
pub trait Document: Serialize + DeserializeOwned {
    /// Collection holding this entity type.
    const COLLECTION: Collection;

    /// Keys written by `to_record`, in no particular order.
    const FIELDS: &'static [&'static str];

    /// Store-assigned identifier, if the document has been persisted.
    fn id(&self) -> Option<&EntityId>;

    /// Record the identifier established by a save.
    fn set_id(&mut self, id: EntityId);

    /// Criteria the store uses to find this document on upsert.
    fn match_criteria(&self) -> Record;

    /// Build the entity from a raw record.
    ///
    /// A record missing a mandatory key fails with serde's own
    /// "missing field" error.
    fn from_record(record: Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record))
    }

    /// Serialize the entity into the record written by a save.
    fn to_record(&self) -> Result<Record, serde_json::Error> {
        let mut record = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Record::new(),
        };
        record.retain(|key, _| Self::FIELDS.contains(&key.as_str()));
        Ok(record)
    }
}

/// Match criteria selecting a record by `_id`.
pub fn id_criteria(id: &EntityId) -> Record {
    let mut criteria = Record::new();
    criteria.insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
    criteria
}
