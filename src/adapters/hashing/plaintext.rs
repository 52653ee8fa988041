//! Verbatim secret storage. Test and development use only.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::ports::SecretHasher;

/// Stores the secret exactly as given. For tests and local development
/// only; production configurations should use
/// [`Sha256SecretHasher`](super::Sha256SecretHasher).
#[derive(Debug, Clone, Default)]
pub struct PlaintextSecretHasher;

impl PlaintextSecretHasher {
    /// Creates the hasher.
    pub fn new() -> Self {
        Self
    }
}

impl SecretHasher for PlaintextSecretHasher {
    fn hash(&self, secret: &SecretString) -> String {
        secret.expose_secret().clone()
    }

    fn verify(&self, secret: &SecretString, stored: &str) -> bool {
        secret
            .expose_secret()
            .as_bytes()
            .ct_eq(stored.as_bytes())
            .into()
    }
}
