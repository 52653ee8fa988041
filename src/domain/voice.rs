//! Custom voices: user-defined perspectives the advisor must simulate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::VoiceId;

/// A named perspective the user wants represented in every analysis,
/// e.g. "My Ideal Self" or "My Mentor".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRecord {
    id: VoiceId,
    pub name: String,
    pub description: String,
}

impl VoiceRecord {
    /// Creates a voice with a caller-assigned id.
    pub fn new(id: VoiceId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Returns the voice's identity.
    pub fn id(&self) -> &VoiceId {
        &self.id
    }
}
