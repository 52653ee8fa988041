//! Secret hasher adapters.

mod plaintext;
mod sha256;

pub use plaintext::PlaintextSecretHasher;
pub use sha256::Sha256SecretHasher;

use std::sync::Arc;

use crate::config::HashingScheme;
use crate::ports::SecretHasher;

/// Builds the hasher a configuration selects.
pub fn from_scheme(scheme: HashingScheme) -> Arc<dyn SecretHasher> {
    match scheme {
        HashingScheme::Sha256 => Arc::new(Sha256SecretHasher::new()),
        HashingScheme::Plaintext => Arc::new(PlaintextSecretHasher::new()),
    }
}
