//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Eunoia domain.

mod errors;
mod ids;
mod timestamp;
mod weight;

pub use errors::ValidationError;
pub use ids::{DecisionId, FactorId, Username, VoiceId};
pub use timestamp::Timestamp;
pub use weight::Weight;
