//! Salted SHA-256 secret hashing.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::ports::SecretHasher;

const SCHEME: &str = "sha256";

/// Stores secrets as `sha256$<salt>$<digest>` with a random per-credential
/// salt and constant-time verification.
#[derive(Debug, Clone, Default)]
pub struct Sha256SecretHasher;

impl Sha256SecretHasher {
    /// Creates the hasher.
    pub fn new() -> Self {
        Self
    }

    fn digest_hex(salt: &str, secret: &SecretString) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(secret.expose_secret().as_bytes());
        to_hex(&hasher.finalize())
    }
}

impl SecretHasher for Sha256SecretHasher {
    fn hash(&self, secret: &SecretString) -> String {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest_hex(&salt, secret);
        format!("{SCHEME}${salt}${digest}")
    }

    fn verify(&self, secret: &SecretString, stored: &str) -> bool {
        let mut parts = stored.splitn(3, '$');
        let (Some(scheme), Some(salt), Some(digest)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if scheme != SCHEME {
            return false;
        }
        let candidate = Self::digest_hex(salt, secret);
        candidate.as_bytes().ct_eq(digest.as_bytes()).into()
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[test]
    fn hash_verifies_against_original_secret() {
        let hasher = Sha256SecretHasher::new();
        let stored = hasher.hash(&secret("pw1"));
        assert!(hasher.verify(&secret("pw1"), &stored));
        assert!(!hasher.verify(&secret("wrong"), &stored));
    }

    #[test]
    fn hash_never_stores_the_cleartext() {
        let hasher = Sha256SecretHasher::new();
        let stored = hasher.hash(&secret("hunter2"));
        assert!(!stored.contains("hunter2"));
        assert!(stored.starts_with("sha256$"));
    }

    #[test]
    fn same_secret_hashes_differently_per_salt() {
        let hasher = Sha256SecretHasher::new();
        let a = hasher.hash(&secret("pw1"));
        let b = hasher.hash(&secret("pw1"));
        assert_ne!(a, b);
        assert!(hasher.verify(&secret("pw1"), &a));
        assert!(hasher.verify(&secret("pw1"), &b));
    }

    #[test]
    fn verify_rejects_garbage_stored_values() {
        let hasher = Sha256SecretHasher::new();
        assert!(!hasher.verify(&secret("pw1"), "not-a-stored-secret"));
        assert!(!hasher.verify(&secret("pw1"), "md5$aa$bb"));
        assert!(!hasher.verify(&secret("pw1"), ""));
    }
}
