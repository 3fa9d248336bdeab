//! JSONL (JSON Lines) storage.
//!
//! Each collection is one file; each line is one record.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use super::{
    apply_upsert, Collection, DocumentStore, Record, StorageConfig, StorageError, UpsertResult,
};

/// JSONL file writer.
pub struct JsonlWriter {
    path: PathBuf,
}

impl JsonlWriter {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a writer for a collection file.
    pub fn for_collection(config: &StorageConfig, collection: Collection) -> Self {
        Self::new(config.collection_path(collection))
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write records, replacing the entire file.
    ///
    /// Writes to a sibling temp file first and renames it over the target,
    /// so a crash mid-write leaves the previous contents intact.
    pub fn write_all(&self, records: &[Record]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let tmp_path = self.path.with_extension("jsonl.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for record in records {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &self.path)?;
        debug!("Wrote {} records to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader {
    path: PathBuf,
}

impl JsonlReader {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a reader for a collection file.
    pub fn for_collection(config: &StorageConfig, collection: Collection) -> Self {
        Self::new(config.collection_path(collection))
    }

    /// Read all records from the file.
    ///
    /// A missing file reads as empty and blank lines are ignored. Any line
    /// that is not a JSON object fails the whole read with its line number,
    /// since the file is rewritten from what was read.
    pub fn read_all(&self) -> Result<Vec<Record>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let record: Record =
                serde_json::from_str(&line).map_err(|source| StorageError::BadLine {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                })?;
            records.push(record);
        }

        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

/// Document store backed by one JSONL file per collection.
///
/// Every upsert rewrites the collection file; collections are a season or
/// a few of football, so whole-file rewrites stay small.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    config: StorageConfig,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Open a store rooted at a data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(StorageConfig::new(data_dir.into()))
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl DocumentStore for JsonlStore {
    fn read_all(&self, collection: Collection) -> Result<Vec<Record>, StorageError> {
        JsonlReader::for_collection(&self.config, collection).read_all()
    }

    fn upsert(
        &self,
        collection: Collection,
        criteria: &Record,
        record: &Record,
    ) -> Result<UpsertResult, StorageError> {
        let mut records = self.read_all(collection)?;
        let result = apply_upsert(&mut records, criteria, record);
        JsonlWriter::for_collection(&self.config, collection).write_all(&records)?;

        if let Some(id) = &result.inserted_id {
            info!("Inserted {} into {}", id, collection);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teams.jsonl");

        let teams = vec![
            record(json!({"_id": "t1", "short_name": "buf", "wins": 11})),
            record(json!({"_id": "t2", "short_name": "lar", "wins": 5})),
        ];

        let count = JsonlWriter::new(path.clone()).write_all(&teams).unwrap();
        assert_eq!(count, 2);

        let read = JsonlReader::new(path).read_all().unwrap();
        assert_eq!(read, teams);
    }

    #[test]
    fn test_write_all_replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("clans.jsonl");
        let writer = JsonlWriter::new(path.clone());

        writer
            .write_all(&[record(json!({"_id": "c1", "clan_name": "Old"}))])
            .unwrap();
        writer
            .write_all(&[record(json!({"_id": "c2", "clan_name": "Team Don"}))])
            .unwrap();

        let read = JsonlReader::new(path.clone()).read_all().unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0]["clan_name"], json!("Team Don"));
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn test_read_all_rejects_bad_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("games.jsonl");

        std::fs::write(
            &path,
            "{\"_id\":\"g1\"}\n\nnot-valid-json\n{\"_id\":\"g2\"}\n",
        )
        .unwrap();

        let err = JsonlReader::new(path).read_all().unwrap_err();
        assert!(matches!(err, StorageError::BadLine { line: 3, .. }));
    }

    #[test]
    fn test_store_reads_collection_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonlStore::open(temp_dir.path());

        std::fs::write(
            temp_dir.path().join("teams.jsonl"),
            r#"{"_id":"t1","short_name":"buf"}

{"_id":"t2","short_name":"lar"}
"#,
        )
        .unwrap();

        let teams = store.read_all(Collection::Teams).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1]["short_name"], json!("lar"));
        assert!(store.read_all(Collection::Games).unwrap().is_empty());
    }

    #[test]
    fn test_store_upsert_insert_then_update() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonlStore::open(temp_dir.path());
        let criteria = record(json!({"tgfp_nfl_game_id": "nfl.g.1"}));

        let first = store
            .upsert(
                Collection::Games,
                &criteria,
                &record(json!({"tgfp_nfl_game_id": "nfl.g.1", "game_status": "STATUS_SCHEDULED"})),
            )
            .unwrap();
        assert!(first.inserted_id.is_some());

        let second = store
            .upsert(
                Collection::Games,
                &criteria,
                &record(json!({"tgfp_nfl_game_id": "nfl.g.1", "game_status": "STATUS_FINAL"})),
            )
            .unwrap();
        assert_eq!(second.inserted_id, None);

        let games = store.read_all(Collection::Games).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0]["game_status"], json!("STATUS_FINAL"));
        assert_eq!(
            games[0]["_id"],
            json!(first.inserted_id.unwrap().as_str())
        );
    }

    #[test]
    fn test_store_upsert_leaves_corrupt_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonlStore::open(temp_dir.path());
        let path = temp_dir.path().join("games.jsonl");
        let contents = "{\"_id\":\"g1\",\"tgfp_nfl_game_id\":\"nfl.1\"}\n\
                        {\"_id\":\"g2\",\"tgfp_nfl_game_id\":\"nfl.2\",BROKEN\n";
        std::fs::write(&path, contents).unwrap();

        let err = store
            .upsert(
                Collection::Games,
                &record(json!({"tgfp_nfl_game_id": "nfl.1"})),
                &record(json!({"game_status": "STATUS_FINAL"})),
            )
            .unwrap_err();

        assert!(matches!(err, StorageError::BadLine { line: 2, .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
        assert!(store.read_all(Collection::Games).is_err());
    }

    #[test]
    fn test_store_find_one() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonlStore::open(temp_dir.path());
        assert!(store.find_one(Collection::Info).unwrap().is_none());

        std::fs::write(
            temp_dir.path().join("tgfp_info.jsonl"),
            "{\"current_season\":2022,\"home_page_text\":\"Welcome\"}\n",
        )
        .unwrap();

        let info = store.find_one(Collection::Info).unwrap().unwrap();
        assert_eq!(info["current_season"], json!(2022));
    }
}
