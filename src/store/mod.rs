//! Store module - The partitioned, transactional local record engine.
//!
//! Collections of JSON documents with string primary keys, non-unique
//! secondary indexes, versioned idempotent opening, and all-or-nothing
//! transactions. Repositories build every durable operation on this engine.

mod engine;
mod error;
mod schema;

pub use engine::{Store, Transaction};
pub use error::StoreError;
pub use schema::{
    CollectionDef, IndexDef, Schema, DECISIONS, LIBRARY_SCHEMA, OWNER_USERNAME, USERS, VOICES,
};
