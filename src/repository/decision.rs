//! Decision library repository.

use serde_json::Value;
use tracing::debug;

use crate::domain::decision::DecisionRecord;
use crate::domain::foundation::{DecisionId, Username};
use crate::store::{Store, StoreError, DECISIONS, OWNER_USERNAME};

/// Owner-scoped persistence for decision records.
///
/// Ownership is a persistence concern only: the owner's username is
/// injected into the stored document for partitioning and stripped from
/// everything returned. All failures are store failures, forwarded
/// unchanged.
#[derive(Debug, Clone)]
pub struct DecisionRepository {
    store: Store,
}

impl DecisionRepository {
    /// Creates a repository over the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the owner's decisions, most recently modified first.
    pub async fn list(&self, owner: &Username) -> Result<Vec<DecisionRecord>, StoreError> {
        let values = self
            .store
            .query_by_index(DECISIONS, OWNER_USERNAME, owner.as_str())
            .await?;

        let mut records = Vec::with_capacity(values.len());
        for value in values {
            records.push(strip_owner(value)?);
        }
        records.sort_by(|a: &DecisionRecord, b: &DecisionRecord| {
            b.last_modified().cmp(&a.last_modified())
        });
        Ok(records)
    }

    /// Saves a decision for the owner, refreshing `last_modified`.
    ///
    /// Re-saving under an existing id overwrites in place, last write wins;
    /// there is no version field and no conflict detection. Returns the
    /// stamped record.
    pub async fn upsert(
        &self,
        owner: &Username,
        mut record: DecisionRecord,
    ) -> Result<DecisionRecord, StoreError> {
        record.touch();
        let mut value = serde_json::to_value(&record)
            .map_err(|e| StoreError::constraint(format!("decision does not serialize: {e}")))?;
        inject_owner(&mut value, owner)?;

        self.store.put(DECISIONS, value).await?;
        debug!(id = %record.id(), owner = %owner, "decision saved");
        Ok(record)
    }

    /// Deletes a decision by id; a missing id is a silent no-op.
    ///
    /// No ownership check happens here: any caller holding a valid id can
    /// delete the record regardless of owner. Known, intentional contract
    /// gap.
    pub async fn remove(&self, id: &DecisionId) -> Result<(), StoreError> {
        self.store.delete(DECISIONS, id.as_str()).await
    }
}

pub(super) fn inject_owner(value: &mut Value, owner: &Username) -> Result<(), StoreError> {
    let map = value
        .as_object_mut()
        .ok_or_else(|| StoreError::constraint("record is not a JSON object"))?;
    map.insert(
        OWNER_USERNAME.to_string(),
        Value::String(owner.as_str().to_string()),
    );
    Ok(())
}

fn strip_owner(mut value: Value) -> Result<DecisionRecord, StoreError> {
    if let Some(map) = value.as_object_mut() {
        map.remove(OWNER_USERNAME);
    }
    serde_json::from_value(value)
        .map_err(|e| StoreError::constraint(format!("stored decision does not match schema: {e}")))
}
