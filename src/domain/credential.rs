//! Stored credentials.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, Username};

/// A registered user's credential.
///
/// Immutable after creation and never deleted. `secret` is the opaque
/// stored representation produced by the configured
/// [`SecretHasher`](crate::ports::SecretHasher); this type never sees the
/// cleartext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    username: Username,
    secret: String,
    created_at: Timestamp,
}

impl Credential {
    /// Creates a credential stamped now.
    pub fn new(username: Username, stored_secret: String) -> Self {
        Self {
            username,
            secret: stored_secret,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the owning username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the stored secret representation.
    pub fn stored_secret(&self) -> &str {
        &self.secret
    }

    /// Returns when the credential was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
