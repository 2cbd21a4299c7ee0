//! Scenario storage seam
//!
//! Raw records are read and written as JSON values; normalization happens
//! on every read, never on write.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use scenario_config::{scenario_key_of, InvalidScenarioError, ScenarioKey};
use serde_json::Value as JsonValue;

/// Storage failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Backing file is not JSON
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Document is neither a record nor an array of records
    #[error("expected a scenario object or an array of them, got {0}")]
    UnexpectedShape(&'static str),

    /// Record written without a readable key
    #[error("record cannot be stored: {0}")]
    Unkeyed(#[from] InvalidScenarioError),
}

/// Read/write access to raw scenario records
pub trait ScenarioStore: Send + Sync {
    /// Raw record for `key`, if stored
    ///
    /// # Errors
    /// Backend failures only; absence is `Ok(None)`.
    fn raw_scenario(&self, key: ScenarioKey) -> Result<Option<JsonValue>, StoreError>;

    /// Every stored record, including ones whose key cannot be read
    ///
    /// # Errors
    /// Backend failures only.
    fn raw_scenarios(&self) -> Result<Vec<JsonValue>, StoreError>;

    /// Insert or replace a record under its own key
    ///
    /// # Errors
    /// [`StoreError::Unkeyed`] if the record has no readable key.
    fn put_raw(&self, record: JsonValue) -> Result<ScenarioKey, StoreError>;
}

#[derive(Debug, Default)]
struct Records {
    keyed: BTreeMap<ScenarioKey, JsonValue>,
    /// Loaded records without a readable key, kept for validation reports
    unkeyed: Vec<JsonValue>,
}

/// In-memory [`ScenarioStore`]
#[derive(Debug, Default)]
pub struct MemoryScenarioStore {
    records: RwLock<Records>,
}

impl MemoryScenarioStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store built from records; the first record for a key wins
    ///
    /// Matches [`ScenarioGraph::build`](scenario_graph::ScenarioGraph::build).
    /// Later duplicates are dropped with a warning. Records without a
    /// readable key are kept aside and surface from
    /// [`raw_scenarios`](ScenarioStore::raw_scenarios) only.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = JsonValue>) -> Self {
        let mut inner = Records::default();
        for record in records {
            match scenario_key_of(&record) {
                Ok(key) => match inner.keyed.entry(key) {
                    Entry::Occupied(_) => {
                        tracing::warn!(scenario = %key, "duplicate scenario record dropped");
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(record);
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "scenario record without readable key");
                    inner.unkeyed.push(record);
                }
            }
        }
        Self {
            records: RwLock::new(inner),
        }
    }

    /// Store built from a JSON document: one record or an array of them
    ///
    /// # Errors
    /// [`StoreError::UnexpectedShape`] for any other JSON value.
    pub fn from_json(document: JsonValue) -> Result<Self, StoreError> {
        match document {
            JsonValue::Array(records) => Ok(Self::from_records(records)),
            record @ JsonValue::Object(_) => Ok(Self::from_records([record])),
            other => Err(StoreError::UnexpectedShape(json_type(&other))),
        }
    }

    /// Store built from a JSON file
    ///
    /// # Errors
    /// I/O, parse and shape failures.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(document)?;
        tracing::info!(path = %path.display(), records = store.len(), "loaded scenario records");
        Ok(store)
    }

    /// Number of stored records, keyed or not
    #[must_use]
    pub fn len(&self) -> usize {
        let records = self.records.read();
        records.keyed.len() + records.unkeyed.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of stored records, ascending
    #[must_use]
    pub fn keys(&self) -> Vec<ScenarioKey> {
        self.records.read().keyed.keys().copied().collect()
    }
}

impl ScenarioStore for MemoryScenarioStore {
    fn raw_scenario(&self, key: ScenarioKey) -> Result<Option<JsonValue>, StoreError> {
        Ok(self.records.read().keyed.get(&key).cloned())
    }

    fn raw_scenarios(&self) -> Result<Vec<JsonValue>, StoreError> {
        let records = self.records.read();
        Ok(records
            .keyed
            .values()
            .chain(records.unkeyed.iter())
            .cloned()
            .collect())
    }

    fn put_raw(&self, record: JsonValue) -> Result<ScenarioKey, StoreError> {
        let key = scenario_key_of(&record)?;
        self.records.write().keyed.insert(key, record);
        tracing::debug!(scenario = %key, "stored scenario record");
        Ok(key)
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_and_get() {
        let store = MemoryScenarioStore::new();
        let key = store
            .put_raw(json!({"sceneId": 1, "subsceneId": 2, "rows": 1, "cols": 1}))
            .unwrap();
        assert_eq!(key, ScenarioKey::new(1, 2));
        assert!(store.raw_scenario(key).unwrap().is_some());
        assert!(store.raw_scenario(ScenarioKey::new(9, 9)).unwrap().is_none());
    }

    #[test]
    fn put_rejects_unkeyed() {
        let store = MemoryScenarioStore::new();
        assert!(matches!(
            store.put_raw(json!({"title": "no key"})),
            Err(StoreError::Unkeyed(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn from_json_accepts_object_or_array() {
        let one = MemoryScenarioStore::from_json(json!({"sceneId": 1, "subsceneId": 1})).unwrap();
        assert_eq!(one.len(), 1);

        let many = MemoryScenarioStore::from_json(json!([
            {"sceneId": 2, "subsceneId": 1},
            {"sceneId": 1, "subsceneId": 1},
            {"title": "orphan"}
        ]))
        .unwrap();
        assert_eq!(many.len(), 3);
        assert_eq!(many.keys(), vec![ScenarioKey::new(1, 1), ScenarioKey::new(2, 1)]);
        assert_eq!(many.raw_scenarios().unwrap().len(), 3);

        assert!(matches!(
            MemoryScenarioStore::from_json(json!("nope")),
            Err(StoreError::UnexpectedShape("string"))
        ));
    }

    #[test]
    fn first_duplicate_wins_on_load() {
        let store = MemoryScenarioStore::from_records([
            json!({"sceneId": 1, "subsceneId": 1, "title": "first"}),
            json!({"sceneId": 2, "subsceneId": 1, "title": "other"}),
            json!({"sceneId": 1, "subsceneId": 1, "title": "second"}),
        ]);
        assert_eq!(store.len(), 2);
        let raw = store.raw_scenario(ScenarioKey::new(1, 1)).unwrap().unwrap();
        assert_eq!(raw["title"], "first");
    }

    #[test]
    fn put_raw_replaces_existing() {
        let store = MemoryScenarioStore::from_records([json!({"sceneId": 1, "subsceneId": 1, "title": "old"})]);
        store
            .put_raw(json!({"sceneId": 1, "subsceneId": 1, "title": "new"}))
            .unwrap();
        let raw = store.raw_scenario(ScenarioKey::new(1, 1)).unwrap().unwrap();
        assert_eq!(raw["title"], "new");
    }
}
