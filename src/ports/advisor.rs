//! Decision Advisor Port - Interface to the generative-AI collaborator.
//!
//! The advisor is an opaque external service: it suggests the factors a
//! dilemma turns on, breaks a factor into first-principle sub-factors, and
//! produces the full analysis. This core only exchanges the typed shapes
//! below — it never builds the service's prompts or parses its wire format,
//! and it supplies no transport, retry, or rate-limit handling.

use async_trait::async_trait;

use crate::domain::decision::{DecisionAnalysis, DecisionContext};
use crate::domain::factor::{FactorNode, FactorTree};
use crate::domain::voice::VoiceRecord;

/// Errors that can occur when consulting the advisor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorError {
    /// The service could not be reached or refused the request.
    #[error("advisor unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something that does not fit the expected
    /// shape.
    #[error("advisor returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Port for the generative-AI decision collaborator.
#[async_trait]
pub trait DecisionAdvisor: Send + Sync {
    /// Suggests the critical leaf factors for a dilemma.
    async fn suggest_factors(
        &self,
        context: &DecisionContext,
    ) -> Result<Vec<FactorNode>, AdvisorError>;

    /// Breaks one factor into granular leaf sub-factors.
    async fn break_down_factor(
        &self,
        factor: &FactorNode,
        context: &DecisionContext,
    ) -> Result<Vec<FactorNode>, AdvisorError>;

    /// Analyzes the decision against the weighted value tree and the user's
    /// custom voices.
    async fn analyze(
        &self,
        context: &DecisionContext,
        value_tree: &FactorTree,
        voices: &[VoiceRecord],
    ) -> Result<DecisionAnalysis, AdvisorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisor_is_object_safe() {
        fn _accepts_dyn(_advisor: &dyn DecisionAdvisor) {}
    }

    #[test]
    fn advisor_errors_display_their_detail() {
        let err = AdvisorError::Unavailable("quota exhausted".to_string());
        assert!(err.to_string().contains("quota exhausted"));

        let err = AdvisorError::MalformedResponse("missing weight".to_string());
        assert!(err.to_string().contains("missing weight"));
    }
}
