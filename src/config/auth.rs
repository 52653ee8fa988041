//! Authentication configuration.

use serde::Deserialize;

/// How registration secrets are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashingScheme {
    /// Salted SHA-256 with constant-time verification.
    #[default]
    Sha256,
    /// Stored verbatim. Test and development use only.
    Plaintext,
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Secret storage scheme.
    #[serde(default)]
    pub hashing: HashingScheme,
}
