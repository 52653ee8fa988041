//! Error types for factor tree mutation.

use thiserror::Error;

use crate::domain::foundation::FactorId;

/// Errors raised by invalid factor tree mutations.
///
/// These indicate caller misuse; no valid sequence of tree operations
/// produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("weight of factor '{0}' is derived from its sub-factors and cannot be set directly")]
    DerivedWeight(FactorId),

    #[error("factor '{0}' already appears on the path from the root; attaching it would make a node its own descendant")]
    Cycle(FactorId),

    #[error("a factor cannot be broken down into zero sub-factors")]
    EmptyBreakdown,

    #[error("no factor '{0}' at the given position")]
    UnknownFactor(FactorId),
}
