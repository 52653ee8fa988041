//! Secret Hasher Port - Pluggable credential storage representation.
//!
//! Whether secrets are stored hashed, and how, is a policy choice outside
//! the registry's contract. The registry only ever calls `hash` on the way
//! in and `verify` on the way out.

use secrecy::SecretString;

/// Port turning a cleartext secret into its stored representation and back
/// into a yes/no comparison.
pub trait SecretHasher: Send + Sync {
    /// Produces the stored representation of a secret.
    fn hash(&self, secret: &SecretString) -> String;

    /// Checks a secret against a stored representation.
    fn verify(&self, secret: &SecretString, stored: &str) -> bool;
}
