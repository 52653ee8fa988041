//! The partitioned record engine.
//!
//! Named collections of JSON documents keyed by a string field, each with
//! optional non-unique secondary indexes. All operations are async over one
//! `tokio::sync::RwLock`; a transaction holds the write half for its whole
//! closure, so staged effects commit all-or-nothing and two transactions
//! racing on the same uniqueness check cannot both succeed.
//!
//! With a data directory configured, the engine loads its JSON snapshot on
//! open and rewrites it (write-temp-then-rename) after every committed
//! mutation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::schema::{IndexDef, Schema};
use super::StoreError;
use crate::config::StoreConfig;

fn extract_key(record: &Value, key_path: &str) -> Result<String, StoreError> {
    record
        .get(key_path)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            StoreError::constraint(format!("record is missing string key field '{key_path}'"))
        })
}

/// One collection: records by primary key plus index data.
#[derive(Debug, Clone)]
struct Collection {
    key_path: String,
    indexes: Vec<IndexDef>,
    records: BTreeMap<String, Value>,
    // index name -> indexed value -> primary keys
    index_data: HashMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl Collection {
    fn new(key_path: impl Into<String>) -> Self {
        Self {
            key_path: key_path.into(),
            indexes: Vec::new(),
            records: BTreeMap::new(),
            index_data: HashMap::new(),
        }
    }

    fn has_index(&self, name: &str) -> bool {
        self.indexes.iter().any(|i| i.name == name)
    }

    /// Adds an index and backfills it from existing records.
    fn add_index(&mut self, def: IndexDef) {
        let mut data = BTreeMap::new();
        for (key, record) in &self.records {
            if let Some(value) = record.get(&def.key_path).and_then(Value::as_str) {
                data.entry(value.to_owned())
                    .or_insert_with(BTreeSet::new)
                    .insert(key.clone());
            }
        }
        self.index_data.insert(def.name.clone(), data);
        self.indexes.push(def);
    }

    fn index_record(&mut self, key: &str, record: &Value) {
        for index in &self.indexes {
            if let Some(value) = record.get(&index.key_path).and_then(Value::as_str) {
                self.index_data
                    .entry(index.name.clone())
                    .or_default()
                    .entry(value.to_owned())
                    .or_default()
                    .insert(key.to_owned());
            }
        }
    }

    fn unindex_record(&mut self, key: &str, record: &Value) {
        for index in &self.indexes {
            if let Some(value) = record.get(&index.key_path).and_then(Value::as_str) {
                if let Some(data) = self.index_data.get_mut(&index.name) {
                    if let Some(keys) = data.get_mut(value) {
                        keys.remove(key);
                        if keys.is_empty() {
                            data.remove(value);
                        }
                    }
                }
            }
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.records.get(key).cloned()
    }

    /// Upserts by primary key, maintaining indexes.
    fn put(&mut self, record: Value) -> Result<(), StoreError> {
        let key = extract_key(&record, &self.key_path)?;
        if let Some(old) = self.records.remove(&key) {
            self.unindex_record(&key, &old);
        }
        self.index_record(&key, &record);
        self.records.insert(key, record);
        Ok(())
    }

    fn delete(&mut self, key: &str) {
        if let Some(old) = self.records.remove(key) {
            self.unindex_record(key, &old);
        }
    }

    fn query_by_index(&self, index: &str, value: &str) -> Result<Vec<Value>, StoreError> {
        if !self.has_index(index) {
            return Err(StoreError::constraint(format!("unknown index '{index}'")));
        }
        let keys = self
            .index_data
            .get(index)
            .and_then(|data| data.get(value));
        Ok(keys
            .map(|keys| {
                keys.iter()
                    .filter_map(|k| self.records.get(k).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[derive(Serialize, Deserialize)]
struct SnapshotIndex {
    name: String,
    key_path: String,
}

#[derive(Serialize, Deserialize)]
struct SnapshotCollection {
    key_path: String,
    indexes: Vec<SnapshotIndex>,
    records: Vec<Value>,
}

/// On-disk image of the whole engine. Index data is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    collections: BTreeMap<String, SnapshotCollection>,
}

#[derive(Debug)]
struct Engine {
    version: u32,
    collections: HashMap<String, Collection>,
    snapshot_path: Option<PathBuf>,
}

impl Engine {
    fn empty() -> Self {
        Self {
            version: 0,
            collections: HashMap::new(),
            snapshot_path: None,
        }
    }

    fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut collections = HashMap::new();
        for (name, stored) in snapshot.collections {
            let mut collection = Collection::new(stored.key_path);
            for index in stored.indexes {
                collection.add_index(IndexDef::new(index.name, index.key_path));
            }
            for record in stored.records {
                collection.put(record).map_err(|e| {
                    StoreError::connection(format!("snapshot is corrupt in '{name}': {e}"))
                })?;
            }
            collections.insert(name, collection);
        }
        Ok(Self {
            version: snapshot.version,
            collections,
            snapshot_path: None,
        })
    }

    fn to_snapshot(&self) -> Snapshot {
        let collections = self
            .collections
            .iter()
            .map(|(name, collection)| {
                (
                    name.clone(),
                    SnapshotCollection {
                        key_path: collection.key_path.clone(),
                        indexes: collection
                            .indexes
                            .iter()
                            .map(|i| SnapshotIndex {
                                name: i.name.clone(),
                                key_path: i.key_path.clone(),
                            })
                            .collect(),
                        records: collection.records.values().cloned().collect(),
                    },
                )
            })
            .collect();
        Snapshot {
            version: self.version,
            collections,
        }
    }

    /// Creates whatever the schema declares and this engine lacks. Existing
    /// collections and their records are never dropped.
    fn ensure_schema(&mut self, schema: &Schema) -> Result<(), StoreError> {
        if self.version > schema.version {
            return Err(StoreError::constraint(format!(
                "stored version {} is newer than requested version {}",
                self.version, schema.version
            )));
        }
        for def in &schema.collections {
            match self.collections.get_mut(&def.name) {
                Some(existing) => {
                    if existing.key_path != def.key_path {
                        return Err(StoreError::constraint(format!(
                            "collection '{}' is keyed on '{}', not '{}'",
                            def.name, existing.key_path, def.key_path
                        )));
                    }
                    for index in &def.indexes {
                        if !existing.has_index(&index.name) {
                            info!(collection = %def.name, index = %index.name, "creating index");
                            existing.add_index(index.clone());
                        }
                    }
                }
                None => {
                    info!(collection = %def.name, "creating collection");
                    let mut collection = Collection::new(def.key_path.clone());
                    for index in &def.indexes {
                        collection.add_index(index.clone());
                    }
                    self.collections.insert(def.name.clone(), collection);
                }
            }
        }
        self.version = schema.version;
        Ok(())
    }

    fn collection(&self, name: &str) -> Result<&Collection, StoreError> {
        self.collections
            .get(name)
            .ok_or_else(|| StoreError::constraint(format!("unknown collection '{name}'")))
    }

    fn collection_mut(&mut self, name: &str) -> Result<&mut Collection, StoreError> {
        self.collections
            .get_mut(name)
            .ok_or_else(|| StoreError::constraint(format!("unknown collection '{name}'")))
    }

    fn apply(&mut self, ops: Vec<StagedOp>) -> Result<(), StoreError> {
        for op in ops {
            match op {
                StagedOp::Put { collection, record, .. } => {
                    self.collection_mut(&collection)?.put(record)?;
                }
                StagedOp::Delete { collection, key } => {
                    self.collection_mut(&collection)?.delete(&key);
                }
            }
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let body = serde_json::to_vec(&self.to_snapshot())
            .map_err(|e| StoreError::connection(format!("failed to serialize snapshot: {e}")))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .await
            .map_err(|e| StoreError::connection(format!("failed to write snapshot: {e}")))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|e| StoreError::connection(format!("failed to replace snapshot: {e}")))?;
        Ok(())
    }
}

#[derive(Debug)]
enum StagedOp {
    Put {
        collection: String,
        key: String,
        record: Value,
    },
    Delete {
        collection: String,
        key: String,
    },
}

/// An in-flight transaction.
///
/// Reads observe the committed state plus this transaction's own staged
/// writes; nothing is applied until the closure returns `Ok`.
pub struct Transaction<'a> {
    engine: &'a Engine,
    staged: Vec<StagedOp>,
}

impl<'a> Transaction<'a> {
    fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            staged: Vec::new(),
        }
    }

    /// Reads a record by primary key; absence is `None`, not an error.
    pub fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let stored = self.engine.collection(collection)?;
        for op in self.staged.iter().rev() {
            match op {
                StagedOp::Put {
                    collection: c,
                    key: k,
                    record,
                } if c == collection && k == key => return Ok(Some(record.clone())),
                StagedOp::Delete { collection: c, key: k } if c == collection && k == key => {
                    return Ok(None)
                }
                _ => {}
            }
        }
        Ok(stored.get(key))
    }

    /// Stages an upsert by primary key.
    pub fn put(&mut self, collection: &str, record: Value) -> Result<(), StoreError> {
        let key = extract_key(&record, &self.engine.collection(collection)?.key_path)?;
        self.staged.push(StagedOp::Put {
            collection: collection.to_owned(),
            key,
            record,
        });
        Ok(())
    }

    /// Stages a strict insert: fails if the primary key is already present,
    /// committed or staged.
    pub fn insert(&mut self, collection: &str, record: Value) -> Result<(), StoreError> {
        let key = extract_key(&record, &self.engine.collection(collection)?.key_path)?;
        if self.get(collection, &key)?.is_some() {
            return Err(StoreError::constraint(format!(
                "duplicate primary key '{key}' in '{collection}'"
            )));
        }
        self.staged.push(StagedOp::Put {
            collection: collection.to_owned(),
            key,
            record,
        });
        Ok(())
    }

    /// Stages a delete; a missing key is a no-op.
    pub fn delete(&mut self, collection: &str, key: &str) -> Result<(), StoreError> {
        self.engine.collection(collection)?;
        self.staged.push(StagedOp::Delete {
            collection: collection.to_owned(),
            key: key.to_owned(),
        });
        Ok(())
    }

    /// Queries a secondary index, observing this transaction's staged
    /// writes. Result order is unspecified.
    pub fn query_by_index(
        &self,
        collection: &str,
        index: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let stored = self.engine.collection(collection)?;
        let mut matches: BTreeMap<String, Value> = stored
            .query_by_index(index, value)?
            .into_iter()
            .map(|record| {
                let key = extract_key(&record, &stored.key_path)?;
                Ok((key, record))
            })
            .collect::<Result<_, StoreError>>()?;

        let index_path = stored
            .indexes
            .iter()
            .find(|i| i.name == index)
            .map(|i| i.key_path.clone())
            .unwrap_or_default();
        for op in &self.staged {
            match op {
                StagedOp::Put {
                    collection: c,
                    key,
                    record,
                } if c == collection => {
                    matches.remove(key);
                    if record.get(&index_path).and_then(Value::as_str) == Some(value) {
                        matches.insert(key.clone(), record.clone());
                    }
                }
                StagedOp::Delete { collection: c, key } if c == collection => {
                    matches.remove(key);
                }
                _ => {}
            }
        }
        Ok(matches.into_values().collect())
    }
}

/// Handle to the record engine. Cheap to clone; all clones share state.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<RwLock<Engine>>,
}

impl Store {
    /// Opens (or creates) the engine described by `config` at the schema's
    /// version.
    ///
    /// Idempotent: collections and indexes the schema adds are created
    /// (indexes backfilled); existing data is never dropped. Opening below
    /// the stored version is a `Constraint` error; an unreadable or corrupt
    /// snapshot is a `Connection` error.
    pub async fn open(config: &StoreConfig, schema: &Schema) -> Result<Self, StoreError> {
        let snapshot_path = config.snapshot_path();
        let mut engine = match &snapshot_path {
            Some(path) => match fs::read_to_string(path).await {
                Ok(text) => {
                    let snapshot: Snapshot = serde_json::from_str(&text).map_err(|e| {
                        StoreError::connection(format!(
                            "snapshot {} is corrupt: {e}",
                            path.display()
                        ))
                    })?;
                    Engine::from_snapshot(snapshot)?
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Engine::empty(),
                Err(e) => {
                    return Err(StoreError::connection(format!(
                        "failed to read snapshot {}: {e}",
                        path.display()
                    )))
                }
            },
            None => Engine::empty(),
        };

        engine.ensure_schema(schema)?;
        engine.snapshot_path = snapshot_path;

        if let Some(dir) = &config.data_dir {
            fs::create_dir_all(dir).await.map_err(|e| {
                StoreError::connection(format!("failed to create {}: {e}", dir.display()))
            })?;
            engine.persist().await?;
        }

        info!(store = %config.name, version = schema.version, "store opened");
        Ok(Self {
            inner: Arc::new(RwLock::new(engine)),
        })
    }

    /// Reads a record by primary key; absence is `None`, not an error.
    pub async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let engine = self.inner.read().await;
        Ok(engine.collection(collection)?.get(key))
    }

    /// Upserts by primary key.
    pub async fn put(&self, collection: &str, record: Value) -> Result<(), StoreError> {
        let mut engine = self.inner.write().await;
        engine.collection_mut(collection)?.put(record)?;
        debug!(collection, "put committed");
        engine.persist().await
    }

    /// Deletes by primary key; a missing key is a silent no-op.
    pub async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let mut engine = self.inner.write().await;
        engine.collection_mut(collection)?.delete(key);
        debug!(collection, key, "delete committed");
        engine.persist().await
    }

    /// Returns all records whose indexed field equals `value`. Order is
    /// unspecified.
    pub async fn query_by_index(
        &self,
        collection: &str,
        index: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let engine = self.inner.read().await;
        engine.collection(collection)?.query_by_index(index, value)
    }

    /// Runs `f` against a transaction context; every staged step applies on
    /// `Ok` and none on `Err`. The engine's write half is held for the
    /// duration, so concurrent check-then-insert sequences serialize.
    pub async fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: for<'a> FnOnce(&mut Transaction<'a>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut engine = self.inner.write().await;
        let mut tx = Transaction::new(&engine);
        let value = f(&mut tx)?;
        let ops = tx.staged;
        debug!(ops = ops.len(), "transaction committing");
        engine.apply(ops).map_err(E::from)?;
        engine.persist().await.map_err(E::from)?;
        Ok(value)
    }
}
