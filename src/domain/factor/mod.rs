//! Factor module - The recursive decision-value tree.
//!
//! A decision's "Decision DNA": an ordered tree of weighted factors where a
//! parent's weight is always the half-up-rounded mean of its direct
//! children. Trees live purely in memory and persist only as an opaque
//! nested payload inside their owning decision record.

mod error;
mod node;
mod tree;

pub use error::TreeError;
pub use node::{FactorNode, RangeStatements};
pub use tree::FactorTree;
