//! Document persistence.
//!
//! The pool is stored as collections of schemaless JSON records, the way a
//! document database holds them:
//! - `DocumentStore`: the read-all / upsert contract the entity store relies on
//! - `Document`: the per-entity serialization contract
//! - `jsonl`: one JSON Lines file per collection under a data directory
//! - `memory`: an in-process store for tests and embedding

mod document;
pub mod jsonl;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::EntityId;

pub use document::{id_criteria, Document};
pub use jsonl::{JsonlReader, JsonlStore, JsonlWriter};
pub use memory::MemoryStore;

/// A raw stored record: field name to value.
pub type Record = Map<String, Value>;

/// Key under which every record carries its identifier.
pub const ID_FIELD: &str = "_id";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse line {line} in {path:?}: {source}")]
    BadLine {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Store lock poisoned for collection {0}")]
    LockPoisoned(Collection),
}

/// The collections that make up the pool database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Teams,
    Games,
    Picks,
    Players,
    Clans,
    /// Singleton metadata record (current season, home page text)
    Info,
}

impl Collection {
    /// Collection name as stored in the database.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Teams => "teams",
            Collection::Games => "games",
            Collection::Picks => "picks",
            Collection::Players => "players",
            Collection::Clans => "clans",
            Collection::Info => "tgfp_info",
        }
    }

    /// Get the filename for this collection.
    pub fn filename(&self) -> String {
        format!("{}.jsonl", self.name())
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of an upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertResult {
    /// Set when no record matched and a new one was inserted.
    pub inserted_id: Option<EntityId>,
}

/// Persistence collaborator for the entity store.
///
/// Calls are blocking and are never retried by the caller.
pub trait DocumentStore {
    /// Read every record of a collection, in storage order.
    fn read_all(&self, collection: Collection) -> Result<Vec<Record>, StorageError>;

    /// Read the first record of a collection, if any.
    fn find_one(&self, collection: Collection) -> Result<Option<Record>, StorageError> {
        Ok(self.read_all(collection)?.into_iter().next())
    }

    /// Update the first record whose fields equal every criterion, or insert
    /// a new record built from the criteria and the given fields.
    fn upsert(
        &self,
        collection: Collection,
        criteria: &Record,
        record: &Record,
    ) -> Result<UpsertResult, StorageError>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn read_all(&self, collection: Collection) -> Result<Vec<Record>, StorageError> {
        (**self).read_all(collection)
    }

    fn find_one(&self, collection: Collection) -> Result<Option<Record>, StorageError> {
        (**self).find_one(collection)
    }

    fn upsert(
        &self,
        collection: Collection,
        criteria: &Record,
        record: &Record,
    ) -> Result<UpsertResult, StorageError> {
        (**self).upsert(collection, criteria, record)
    }
}

/// Whether a record carries every criterion with an equal value.
pub fn matches_criteria(record: &Record, criteria: &Record) -> bool {
    criteria
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}

/// Apply `$set`-style upsert semantics to an in-memory list of records.
///
/// Shared by every store implementation so they agree on matching and on
/// how inserted records are shaped.
pub fn apply_upsert(records: &mut Vec<Record>, criteria: &Record, fields: &Record) -> UpsertResult {
    if let Some(existing) = records
        .iter_mut()
        .find(|record| matches_criteria(record, criteria))
    {
        for (key, value) in fields {
            existing.insert(key.clone(), value.clone());
        }
        debug!("Updated record matching {:?}", criteria);
        return UpsertResult { inserted_id: None };
    }

    let id = match criteria.get(ID_FIELD) {
        Some(Value::String(id)) => EntityId::new(id.clone()),
        _ => EntityId::generate(),
    };

    let mut inserted = Record::new();
    inserted.insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
    for (key, value) in criteria.iter().chain(fields.iter()) {
        if key != ID_FIELD {
            inserted.insert(key.clone(), value.clone());
        }
    }
    records.push(inserted);
    debug!("Inserted record {}", id);

    UpsertResult {
        inserted_id: Some(id),
    }
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the JSONL file backing a collection.
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
