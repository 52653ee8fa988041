//! BreakDownFactorHandler - Fractal "deep dive" into one factor.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::decision::DecisionContext;
use crate::domain::factor::{FactorTree, TreeError};
use crate::domain::foundation::FactorId;
use crate::ports::{AdvisorError, DecisionAdvisor};

/// Command to break the factor at `path` into sub-factors.
#[derive(Debug, Clone)]
pub struct BreakDownFactorCommand {
    pub path: Vec<FactorId>,
    pub context: DecisionContext,
}

/// What the breakdown did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDownOutcome {
    /// Sub-factors were generated and attached.
    BrokenDown,
    /// The factor already had sub-factors; the advisor was not consulted.
    AlreadyBrokenDown,
}

/// Errors raised by the breakdown flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakDownError {
    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Handler breaking one factor into first-principle sub-factors via the
/// advisor.
pub struct BreakDownFactorHandler {
    advisor: Arc<dyn DecisionAdvisor>,
}

impl BreakDownFactorHandler {
    pub fn new(advisor: Arc<dyn DecisionAdvisor>) -> Self {
        Self { advisor }
    }

    /// Breaks down the factor at `cmd.path`, attaching the advisor's
    /// sub-factors and rolling weights up the path.
    ///
    /// Idempotent on an already-derived factor: it is left untouched and
    /// the advisor is not consulted.
    ///
    /// # Errors
    ///
    /// Advisor and tree failures propagate; an empty sub-factor set is
    /// `MalformedResponse`.
    pub async fn handle(
        &self,
        tree: &mut FactorTree,
        cmd: BreakDownFactorCommand,
    ) -> Result<BreakDownOutcome, BreakDownError> {
        let target = tree.resolve(&cmd.path)?;
        if !target.is_leaf() {
            return Ok(BreakDownOutcome::AlreadyBrokenDown);
        }

        let target = target.clone();
        let sub_factors = self.advisor.break_down_factor(&target, &cmd.context).await?;
        if sub_factors.is_empty() {
            return Err(AdvisorError::MalformedResponse(
                "advisor returned no sub-factors".to_string(),
            )
            .into());
        }

        tree.attach_children(&cmd.path, sub_factors)?;
        Ok(BreakDownOutcome::BrokenDown)
    }
}
