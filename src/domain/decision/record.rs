//! A saved decision: context, value tree, and optional analysis.

use serde::{Deserialize, Serialize};

use super::{DecisionAnalysis, DecisionContext};
use crate::domain::factor::FactorTree;
use crate::domain::foundation::{DecisionId, Timestamp};

/// One decision in a user's library.
///
/// The id is caller-assigned and immutable; re-saving under the same id
/// overwrites in place and refreshes `last_modified`. The owning username
/// is a persistence concern: it is injected by the repository on write and
/// stripped on read, and never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    id: DecisionId,
    pub context: DecisionContext,
    pub value_tree: FactorTree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<DecisionAnalysis>,
    last_modified: Timestamp,
}

impl DecisionRecord {
    /// Creates a record stamped now, with no analysis yet.
    pub fn new(id: DecisionId, context: DecisionContext, value_tree: FactorTree) -> Self {
        Self {
            id,
            context,
            value_tree,
            analysis: None,
            last_modified: Timestamp::now(),
        }
    }

    /// Attaches an analysis result.
    pub fn with_analysis(mut self, analysis: DecisionAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Returns the record's identity.
    pub fn id(&self) -> &DecisionId {
        &self.id
    }

    /// Returns when the record was last written.
    pub fn last_modified(&self) -> Timestamp {
        self.last_modified
    }

    /// Refreshes `last_modified` to now.
    pub fn touch(&mut self) {
        self.last_modified = Timestamp::now();
    }
}
