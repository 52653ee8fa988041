//! GenerateFactorsHandler - Builds a fresh value tree from advisor
//! suggestions.

use std::sync::Arc;

use crate::domain::decision::DecisionContext;
use crate::domain::factor::{FactorNode, FactorTree};
use crate::domain::foundation::{FactorId, Weight};
use crate::ports::{AdvisorError, DecisionAdvisor};

/// Command to generate the initial factors for a dilemma.
#[derive(Debug, Clone)]
pub struct GenerateFactorsCommand {
    pub context: DecisionContext,
}

/// Handler asking the advisor for the critical factors of a dilemma and
/// assembling them into a tree rooted at the dilemma itself.
pub struct GenerateFactorsHandler {
    advisor: Arc<dyn DecisionAdvisor>,
}

impl GenerateFactorsHandler {
    pub fn new(advisor: Arc<dyn DecisionAdvisor>) -> Self {
        Self { advisor }
    }

    /// Suggests factors and rolls them up under a root named after the
    /// dilemma.
    ///
    /// # Errors
    ///
    /// Advisor failures propagate unchanged; an empty or id-colliding
    /// suggestion set is `MalformedResponse`.
    pub async fn handle(&self, cmd: GenerateFactorsCommand) -> Result<FactorTree, AdvisorError> {
        let factors = self.advisor.suggest_factors(&cmd.context).await?;
        if factors.is_empty() {
            return Err(AdvisorError::MalformedResponse(
                "advisor suggested no factors".to_string(),
            ));
        }

        let root = FactorNode::leaf(FactorId::new(), cmd.context.title.clone(), Weight::default())
            .with_description(cmd.context.description.clone())
            .with_category("Overall")
            .with_labels("Caution", "Conviction");
        let mut tree = FactorTree::new(root);
        tree.attach_children(&[], factors)
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::advisor::ScriptedAdvisor;

    fn command() -> GenerateFactorsCommand {
        GenerateFactorsCommand {
            context: DecisionContext::new("Relocate the company", "SF vs Austin"),
        }
    }

    fn leaf(id: &str, weight: u8) -> FactorNode {
        FactorNode::leaf(FactorId::from_string(id), id.to_string(), Weight::new(weight))
    }

    #[tokio::test]
    async fn builds_a_rolled_up_tree_from_suggestions() {
        let advisor = ScriptedAdvisor::new()
            .with_suggestions(vec![leaf("a", 10), leaf("b", 20), leaf("c", 30), leaf("d", 45)]);
        let handler = GenerateFactorsHandler::new(Arc::new(advisor));

        let tree = handler.handle(command()).await.unwrap();
        assert_eq!(tree.root().name, "Relocate the company");
        assert_eq!(tree.root().children().len(), 4);
        // mean 26.25 -> 26
        assert_eq!(tree.root().weight().value(), 26);
    }

    #[tokio::test]
    async fn advisor_failure_propagates_unchanged() {
        let advisor = ScriptedAdvisor::new()
            .with_suggestions_error(AdvisorError::Unavailable("down".to_string()));
        let handler = GenerateFactorsHandler::new(Arc::new(advisor));

        let result = handler.handle(command()).await;
        assert_eq!(result, Err(AdvisorError::Unavailable("down".to_string())));
    }

    #[tokio::test]
    async fn empty_suggestion_set_is_malformed() {
        let advisor = ScriptedAdvisor::new().with_suggestions(vec![]);
        let handler = GenerateFactorsHandler::new(Arc::new(advisor));

        let result = handler.handle(command()).await;
        assert!(matches!(result, Err(AdvisorError::MalformedResponse(_))));
    }
}
