//! Collection schema declarations.
//!
//! A schema names the collections an engine serves, the record field each
//! collection keys on, and any secondary indexes. Opening a store at a
//! higher version creates whatever the schema added; existing data is never
//! dropped.

use once_cell::sync::Lazy;

/// A secondary index over one record field. Non-unique: many records may
/// share an indexed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: String,
    pub key_path: String,
}

impl IndexDef {
    /// Creates an index definition.
    pub fn new(name: impl Into<String>, key_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_path: key_path.into(),
        }
    }
}

/// One named collection: its primary key field and its indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDef {
    pub name: String,
    pub key_path: String,
    pub indexes: Vec<IndexDef>,
}

impl CollectionDef {
    /// Creates a collection keyed on `key_path`.
    pub fn new(name: impl Into<String>, key_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_path: key_path.into(),
            indexes: Vec::new(),
        }
    }

    /// Adds a secondary index.
    pub fn with_index(mut self, name: impl Into<String>, key_path: impl Into<String>) -> Self {
        self.indexes.push(IndexDef::new(name, key_path));
        self
    }
}

/// A versioned set of collection definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub version: u32,
    pub collections: Vec<CollectionDef>,
}

impl Schema {
    /// Creates an empty schema at the given version.
    pub fn new(version: u32) -> Self {
        Self {
            version,
            collections: Vec::new(),
        }
    }

    /// Adds a collection definition.
    pub fn collection(mut self, def: CollectionDef) -> Self {
        self.collections.push(def);
        self
    }
}

/// The `users` collection, keyed by username.
pub const USERS: &str = "users";

/// The `decisions` collection, keyed by decision id.
pub const DECISIONS: &str = "decisions";

/// The `voices` collection, keyed by voice id.
pub const VOICES: &str = "voices";

/// Field injected into owned records on write, and the name of the index
/// over it. Stripped from every record before it reaches a caller.
pub const OWNER_USERNAME: &str = "owner_username";

/// The decision library's schema: users, decisions, and voices, with the
/// owned collections partitioned by an owner index.
pub static LIBRARY_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(1)
        .collection(CollectionDef::new(USERS, "username"))
        .collection(CollectionDef::new(DECISIONS, "id").with_index(OWNER_USERNAME, OWNER_USERNAME))
        .collection(CollectionDef::new(VOICES, "id").with_index(OWNER_USERNAME, OWNER_USERNAME))
});
