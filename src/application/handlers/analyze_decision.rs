//! AnalyzeDecisionHandler - Runs the advisor's analysis and auto-saves for
//! signed-in owners.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::decision::{DecisionAnalysis, DecisionContext, DecisionRecord};
use crate::domain::factor::FactorTree;
use crate::domain::foundation::{DecisionId, Username};
use crate::domain::voice::VoiceRecord;
use crate::ports::{AdvisorError, DecisionAdvisor};
use crate::repository::DecisionRepository;
use crate::store::StoreError;

/// Command to analyze a decision against its weighted value tree.
///
/// `owner` is `None` for anonymous sessions: the analysis still runs, but
/// nothing is saved.
#[derive(Debug, Clone)]
pub struct AnalyzeDecisionCommand {
    pub owner: Option<Username>,
    pub id: DecisionId,
    pub context: DecisionContext,
    pub value_tree: FactorTree,
    pub voices: Vec<VoiceRecord>,
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeDecisionResult {
    pub analysis: DecisionAnalysis,
    /// The record written to the owner's library, when there was an owner.
    pub saved: Option<DecisionRecord>,
}

/// Errors raised by the analysis flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handler running the advisor's analysis and auto-saving the decision when
/// an owner is signed in.
pub struct AnalyzeDecisionHandler {
    advisor: Arc<dyn DecisionAdvisor>,
    decisions: DecisionRepository,
}

impl AnalyzeDecisionHandler {
    pub fn new(advisor: Arc<dyn DecisionAdvisor>, decisions: DecisionRepository) -> Self {
        Self { advisor, decisions }
    }

    /// Analyzes the decision; with an owner, upserts the record (analysis
    /// attached) into their library and returns the stamped copy.
    ///
    /// # Errors
    ///
    /// Advisor and store failures propagate unchanged. A store failure
    /// after a successful analysis fails the call; nothing was saved.
    pub async fn handle(
        &self,
        cmd: AnalyzeDecisionCommand,
    ) -> Result<AnalyzeDecisionResult, AnalyzeError> {
        let analysis = self
            .advisor
            .analyze(&cmd.context, &cmd.value_tree, &cmd.voices)
            .await?;

        let saved = match &cmd.owner {
            Some(owner) => {
                let record = DecisionRecord::new(cmd.id, cmd.context, cmd.value_tree)
                    .with_analysis(analysis.clone());
                let stamped = self.decisions.upsert(owner, record).await?;
                debug!(id = %stamped.id(), owner = %owner, "analysis auto-saved");
                Some(stamped)
            }
            None => None,
        };

        Ok(AnalyzeDecisionResult { analysis, saved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::advisor::ScriptedAdvisor;
    use crate::config::StoreConfig;
    use crate::domain::decision::{
        ExecutiveSummary, ImplementationPlan, InferredContext, ShadowDecision,
    };
    use crate::domain::factor::FactorNode;
    use crate::domain::foundation::{FactorId, Weight};
    use crate::store::{Store, LIBRARY_SCHEMA};

    fn analysis() -> DecisionAnalysis {
        DecisionAnalysis {
            executive_summary: ExecutiveSummary {
                situation: "S".to_string(),
                complication: "C".to_string(),
                resolution: "R".to_string(),
            },
            strategic_pillars: vec![],
            implementation_plan: ImplementationPlan {
                immediate_actions: vec![],
                resource_implications: String::new(),
                communication_strategy: String::new(),
            },
            confidence_score: Weight::new(70),
            values_alignment_score: Weight::new(80),
            inferred_context: InferredContext {
                stakes: "High".to_string(),
                time_horizon: "1 year".to_string(),
                key_constraints: vec![],
            },
            summary: "Essential logic".to_string(),
            assumptions: vec![],
            tradeoffs: vec![],
            agents: vec![],
            contingencies: vec![],
            shadow_decision: ShadowDecision {
                alternative_option: "Other".to_string(),
                reasoning: "Why".to_string(),
                why_rejected: "Weights".to_string(),
            },
        }
    }

    fn command(owner: Option<&str>) -> AnalyzeDecisionCommand {
        let root = FactorNode::leaf(FactorId::from_string("root"), "Root", Weight::new(50));
        AnalyzeDecisionCommand {
            owner: owner.map(|o| Username::new(o).unwrap()),
            id: DecisionId::from_string("d1"),
            context: DecisionContext::new("Title", "Description"),
            value_tree: FactorTree::new(root),
            voices: vec![],
        }
    }

    async fn handler_with(advisor: ScriptedAdvisor) -> (AnalyzeDecisionHandler, DecisionRepository) {
        let store = Store::open(&StoreConfig::default(), &LIBRARY_SCHEMA)
            .await
            .unwrap();
        let decisions = DecisionRepository::new(store);
        (
            AnalyzeDecisionHandler::new(Arc::new(advisor), decisions.clone()),
            decisions,
        )
    }

    #[tokio::test]
    async fn signed_in_analysis_auto_saves_the_decision() {
        let (handler, decisions) =
            handler_with(ScriptedAdvisor::new().with_analysis(analysis())).await;

        let result = handler.handle(command(Some("bob"))).await.unwrap();
        assert!(result.saved.is_some());

        let listed = decisions.list(&Username::new("bob").unwrap()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].analysis, Some(analysis()));
    }

    #[tokio::test]
    async fn anonymous_analysis_saves_nothing() {
        let (handler, decisions) =
            handler_with(ScriptedAdvisor::new().with_analysis(analysis())).await;

        let result = handler.handle(command(None)).await.unwrap();
        assert_eq!(result.analysis, analysis());
        assert!(result.saved.is_none());

        let listed = decisions.list(&Username::new("bob").unwrap()).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn advisor_failure_saves_nothing() {
        let (handler, decisions) = handler_with(
            ScriptedAdvisor::new()
                .with_analysis_error(AdvisorError::Unavailable("down".to_string())),
        )
        .await;

        let result = handler.handle(command(Some("bob"))).await;
        assert!(matches!(
            result,
            Err(AnalyzeError::Advisor(AdvisorError::Unavailable(_)))
        ));

        let listed = decisions.list(&Username::new("bob").unwrap()).await.unwrap();
        assert!(listed.is_empty());
    }
}
