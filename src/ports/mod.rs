//! Ports - Interfaces this core depends on but does not implement itself.

mod advisor;
mod secret_hasher;

pub use advisor::{AdvisorError, DecisionAdvisor};
pub use secret_hasher::SecretHasher;
