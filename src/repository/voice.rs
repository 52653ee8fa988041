//! Custom voice repository.

use serde_json::Value;
use tracing::debug;

use super::decision::inject_owner;
use crate::domain::foundation::{Username, VoiceId};
use crate::domain::voice::VoiceRecord;
use crate::store::{Store, StoreError, OWNER_USERNAME, VOICES};

/// Owner-scoped persistence for custom voices.
///
/// Same contract as the decision repository, except `list` carries no
/// ordering guarantee: treat the result as a set.
#[derive(Debug, Clone)]
pub struct VoiceRepository {
    store: Store,
}

impl VoiceRepository {
    /// Creates a repository over the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the owner's voices, in no particular order.
    pub async fn list(&self, owner: &Username) -> Result<Vec<VoiceRecord>, StoreError> {
        let values = self
            .store
            .query_by_index(VOICES, OWNER_USERNAME, owner.as_str())
            .await?;

        let mut voices = Vec::with_capacity(values.len());
        for value in values {
            voices.push(strip_owner(value)?);
        }
        Ok(voices)
    }

    /// Saves a voice for the owner; re-saving an id overwrites in place.
    pub async fn upsert(&self, owner: &Username, voice: VoiceRecord) -> Result<(), StoreError> {
        let mut value = serde_json::to_value(&voice)
            .map_err(|e| StoreError::constraint(format!("voice does not serialize: {e}")))?;
        inject_owner(&mut value, owner)?;

        self.store.put(VOICES, value).await?;
        debug!(id = %voice.id(), owner = %owner, "voice saved");
        Ok(())
    }

    /// Deletes a voice by id; a missing id is a silent no-op. No ownership
    /// check happens here — known, intentional contract gap.
    pub async fn remove(&self, id: &VoiceId) -> Result<(), StoreError> {
        self.store.delete(VOICES, id.as_str()).await
    }
}

fn strip_owner(mut value: Value) -> Result<VoiceRecord, StoreError> {
    if let Some(map) = value.as_object_mut() {
        map.remove(OWNER_USERNAME);
    }
    serde_json::from_value(value)
        .map_err(|e| StoreError::constraint(format!("stored voice does not match schema: {e}")))
}
